use once_cell::sync::Lazy;
use regex::Regex;

use crate::class::ComponentClass;
use crate::error::UnsupportedListing;
use crate::listing::{Attributes, Listing};
use crate::part::{CapacitorParams, Parametric, PartDefinition};
use crate::units::parse_si;

use super::{PartContext, assemble};

const CLASS: ComponentClass = ComponentClass::Capacitor;

/// Only plain percentages are trusted; anything else ("N/A", "+80/-20%",
/// "±0.25pF") is dropped.
static PERCENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[\d.]+\s*%\s*$").unwrap());

pub(super) fn generate(
    listing: &Listing<'_>,
    ctx: &PartContext<'_>,
) -> Result<PartDefinition, UnsupportedListing> {
    let attrs = listing.attrs()?;
    let base = ctx.base(CLASS, &attrs)?;

    let tolerance = match attrs.get("tolerance")? {
        Some(t) if PERCENT.is_match(&t) => Some(parse_si(&t, "%")?),
        _ => None,
    };
    let dielectric = dielectric(&attrs)?;
    let value = parse_si(&attrs.require("value")?, "")?;
    let wvdc = parse_si(&attrs.require("voltage rating")?, "V")?;

    let parametric = Parametric::Capacitor(CapacitorParams {
        table: CLASS.table_name(),
        tolerance,
        dielectric,
        value,
        wvdc,
    });
    assemble(CLASS, listing, ctx, base, parametric, value)
}

fn dielectric(attrs: &Attributes<'_>) -> Result<String, UnsupportedListing> {
    let kind = attrs.get("type")?;
    if kind.is_some_and(|k| k.to_lowercase().contains("electrolytic")) {
        return Ok("Electrolytic".to_string());
    }

    let dielectric = attrs.get("dielectric")?;
    let dielectric = dielectric.as_deref().unwrap_or_default().trim();
    Ok(match dielectric {
        "C0G (NP0)" => "C0G/NP0".to_string(),
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use serde_json::{Value, json};

    use crate::generate::{PartContext, generate};
    use crate::part::{CapacitorParams, Editable, Parametric, PartDefinition};
    use crate::table::BaseTable;
    use crate::{ComponentClass, UnsupportedListing};

    fn listing(attrs: Value) -> Value {
        json!({
            "mpn": "GRM188R71H104KA93D",
            "id": "5a0c8d4e-3f2b-4d6a-8e1f-9b7c6d5e4f3a",
            "part_desc": "CAP CER 0.1UF 50V X7R 0603",
            "part_datasheet": "https://example.com/grm.pdf",
            "part_attrs": attrs,
        })
    }

    fn capacitor(attrs: Value) -> Result<PartDefinition, UnsupportedListing> {
        let bases = BaseTable::builtin();
        generate(ComponentClass::Capacitor, &listing(attrs), &PartContext::new(&bases))
    }

    fn params(part: &PartDefinition) -> &CapacitorParams {
        match &part.parametric {
            Parametric::Capacitor(params) => params,
            other => panic!("expected capacitor parametric, got {other:?}"),
        }
    }

    #[test]
    fn generates_capacitor_part() {
        let part = capacitor(json!({
            "package": "0603",
            "value": "100n",
            "tolerance": "10%",
            "voltage rating": "50V",
            "dielectric": "X7R",
            "type": "Ceramic Capacitor",
        }))
        .unwrap();

        assert_eq!(part.base, "436da8ee-a0a4-4ab4-ae41-10323bb580e5");
        assert_eq!(part.value, Editable::locked("100 nF".to_string()));
        assert_eq!(
            params(&part),
            &CapacitorParams {
                table: "capacitors",
                tolerance: Some(dec!(10)),
                dielectric: "X7R".to_string(),
                value: dec!(0.0000001),
                wvdc: dec!(50),
            }
        );

        let json: Value = serde_json::from_str(&part.to_pretty_json().unwrap()).unwrap();
        assert_eq!(
            json["parametric"],
            json!({
                "table": "capacitors",
                "tolerance": "10",
                "type": "X7R",
                "value": "0.0000001",
                "wvdc": "50",
            })
        );
    }

    #[test]
    fn malformed_tolerance_is_blank() {
        for tolerance in ["N/A", "+80/-20%", "±0.25pF", "10"] {
            let part = capacitor(json!({
                "package": "0402",
                "value": "1u",
                "tolerance": tolerance,
                "voltage rating": "16V",
                "type": "Ceramic",
            }))
            .unwrap();
            assert_eq!(params(&part).tolerance, None, "tolerance {tolerance:?}");
        }
    }

    #[test]
    fn spaced_tolerance_is_accepted() {
        let part = capacitor(json!({
            "package": "0402",
            "value": "1u",
            "tolerance": " 5 % ",
            "voltage rating": "16V",
        }))
        .unwrap();
        assert_eq!(params(&part).tolerance, Some(dec!(5)));
    }

    #[test]
    fn c0g_dielectric_is_renamed() {
        let part = capacitor(json!({
            "package": "0402",
            "value": "22p",
            "tolerance": "5%",
            "voltage rating": "50V",
            "dielectric": " C0G (NP0) ",
            "type": "Ceramic Capacitor",
        }))
        .unwrap();
        assert_eq!(params(&part).dielectric, "C0G/NP0");
        assert_eq!(part.value.1, "22 pF");
    }

    #[test]
    fn electrolytic_type_overrides_dielectric() {
        let part = capacitor(json!({
            "package": "1210",
            "value": "100u",
            "tolerance": "20%",
            "voltage rating": "25V",
            "dielectric": "X5R",
            "type": "ALUMINUM ELECTROLYTIC CAPACITOR",
        }))
        .unwrap();
        assert_eq!(params(&part).dielectric, "Electrolytic");
        assert_eq!(part.value.1, "100 uF");
    }

    #[test]
    fn missing_dielectric_is_blank() {
        let part = capacitor(json!({
            "package": "0805",
            "value": "4.7u",
            "tolerance": "10%",
            "voltage rating": "N/A",
        }))
        .unwrap();
        assert_eq!(params(&part).dielectric, "");
        assert_eq!(params(&part).wvdc, dec!(0));
    }

    #[test]
    fn unknown_package_is_unsupported() {
        let err = capacitor(json!({
            "package": "2220",
            "value": "1u",
            "tolerance": "10%",
            "voltage rating": "100V",
        }))
        .unwrap_err();
        assert_eq!(err, UnsupportedListing::BadPackage(Some("2220".to_string())));
    }

    #[test]
    fn value_with_unit_letter_is_unsupported() {
        let err = capacitor(json!({
            "package": "0603",
            "value": "100nF",
            "tolerance": "10%",
            "voltage rating": "50V",
        }))
        .unwrap_err();
        assert_eq!(err.to_string(), "unsupported SI prefix 'F'");
    }
}
