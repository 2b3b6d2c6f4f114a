use crate::class::ComponentClass;
use crate::error::UnsupportedListing;
use crate::listing::Listing;
use crate::part::{Parametric, PartDefinition, ResistorParams};
use crate::units::parse_si;

use super::{PartContext, assemble};

const CLASS: ComponentClass = ComponentClass::Resistor;

pub(super) fn generate(
    listing: &Listing<'_>,
    ctx: &PartContext<'_>,
) -> Result<PartDefinition, UnsupportedListing> {
    let attrs = listing.attrs()?;
    let base = ctx.base(CLASS, &attrs)?;

    let value = parse_si(&attrs.require("value")?, "")?;
    let pmax = parse_si(&attrs.require("power rating")?, "W")?;
    // Many resistor listings carry no tolerance at all.
    let tolerance = match attrs.get("tolerance")? {
        Some(t) if !t.trim().is_empty() => Some(parse_si(&t, "%")?),
        _ => None,
    };

    let parametric = Parametric::Resistor(ResistorParams {
        pmax,
        table: CLASS.table_name(),
        tolerance,
        value,
    });
    assemble(CLASS, listing, ctx, base, parametric, value)
}
