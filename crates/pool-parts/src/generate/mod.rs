//! Map normalized listings onto pool part definitions, one generator per class.

mod capacitor;
mod resistor;

use rust_decimal::Decimal;
use serde_json::Value;

use crate::class::ComponentClass;
use crate::error::UnsupportedListing;
use crate::listing::{Attributes, Listing};
use crate::part::{Editable, PART_TYPE, Parametric, PartDefinition};
use crate::table::BaseTable;
use crate::units::format_si;

/// Inputs shared by every record of one class during a sync.
#[derive(Debug, Clone, Copy)]
pub struct PartContext<'a> {
    pub bases: &'a BaseTable,
    /// Editable flag written on the (always empty) `manufacturer` field.
    pub manufacturer_editable: bool,
}

impl<'a> PartContext<'a> {
    pub fn new(bases: &'a BaseTable) -> Self {
        Self {
            bases,
            manufacturer_editable: true,
        }
    }

    pub fn with_manufacturer_editable(mut self, editable: bool) -> Self {
        self.manufacturer_editable = editable;
        self
    }

    fn base(
        &self,
        class: ComponentClass,
        attrs: &Attributes<'_>,
    ) -> Result<String, UnsupportedListing> {
        let package = attrs.get("package")?;
        package
            .as_deref()
            .and_then(|p| self.bases.lookup(class, p))
            .map(str::to_string)
            .ok_or_else(|| UnsupportedListing::BadPackage(package.map(|p| p.into_owned())))
    }
}

/// Generate the part definition for one normalized listing record.
pub fn generate(
    class: ComponentClass,
    record: &Value,
    ctx: &PartContext<'_>,
) -> Result<PartDefinition, UnsupportedListing> {
    let listing = Listing::new(record)?;
    match class {
        ComponentClass::Resistor => resistor::generate(&listing, ctx),
        ComponentClass::Capacitor => capacitor::generate(&listing, ctx),
    }
}

/// Part file names are `<MPN>.json`, so the MPN has to be a single path
/// component.
fn check_file_name(mpn: &str) -> Result<(), UnsupportedListing> {
    let bad = mpn.trim().is_empty()
        || mpn == "."
        || mpn == ".."
        || mpn.contains(['/', '\\', '\0']);
    if bad {
        return Err(UnsupportedListing::InvalidFileName(mpn.to_string()));
    }
    Ok(())
}

/// Assemble the class-independent parts of a definition around `parametric`.
fn assemble(
    class: ComponentClass,
    listing: &Listing<'_>,
    ctx: &PartContext<'_>,
    base: String,
    parametric: Parametric,
    value: Decimal,
) -> Result<PartDefinition, UnsupportedListing> {
    let mpn = listing.mpn()?;
    check_file_name(mpn)?;

    Ok(PartDefinition {
        mpn: Editable::locked(mpn.to_string()),
        base,
        datasheet: Editable::locked(listing.str_field("part_datasheet")?.to_string()),
        description: Editable::locked(listing.str_field("part_desc")?.to_string()),
        inherit_model: true,
        inherit_tags: true,
        manufacturer: Editable(ctx.manufacturer_editable, String::new()),
        parametric,
        tags: Vec::new(),
        kind: PART_TYPE,
        uuid: listing.id()?.to_string(),
        value: Editable::locked(format_si(value, class.display_unit())),
    })
}
