//! Physical phase of a catalogue record.

use serde::{Deserialize, Serialize};

/// Phase of matter as labelled by the reference catalogue.
///
/// The catalogue occasionally carries labels outside the four standard
/// phases; those survive as `Unknown` rather than failing the row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Solid,
    Liquid,
    Gas,
    /// Aqueous solution entries (dissolved species).
    Aqueous,
    /// Unrecognized catalogue label, kept verbatim.
    Unknown(String),
}

impl Phase {
    /// Parse a catalogue phase label ("s", "l", "g", "ao"/"aq", ...).
    pub fn from_label(label: &str) -> Phase {
        match label.trim().to_ascii_lowercase().as_str() {
            "s" | "sol" | "solid" => Phase::Solid,
            "l" | "liq" | "liquid" => Phase::Liquid,
            "g" | "gas" => Phase::Gas,
            "ao" | "ai" | "aq" | "aqueous" => Phase::Aqueous,
            _ => Phase::Unknown(label.trim().to_string()),
        }
    }

    /// Canonical short label as used in bracketed formula suffixes.
    pub fn label(&self) -> &str {
        match self {
            Phase::Solid => "s",
            Phase::Liquid => "l",
            Phase::Gas => "g",
            Phase::Aqueous => "ao",
            Phase::Unknown(raw) => raw,
        }
    }

    /// Ordinal position on the heating axis: solid=0, liquid=1, gas=2.
    ///
    /// Aqueous and unrecognized labels carry no heating ordinal; transition
    /// checks treat them as always permitted.
    pub fn heating_ordinal(&self) -> Option<u8> {
        match self {
            Phase::Solid => Some(0),
            Phase::Liquid => Some(1),
            Phase::Gas => Some(2),
            Phase::Aqueous | Phase::Unknown(_) => None,
        }
    }

    /// Loader sort priority: gas < liquid < solid < aqueous.
    pub fn sort_priority(&self) -> u8 {
        match self {
            Phase::Gas => 0,
            Phase::Liquid => 1,
            Phase::Solid => 2,
            Phase::Aqueous => 3,
            Phase::Unknown(_) => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_standard_labels() {
        assert_eq!(Phase::from_label("s"), Phase::Solid);
        assert_eq!(Phase::from_label("L"), Phase::Liquid);
        assert_eq!(Phase::from_label(" g "), Phase::Gas);
        assert_eq!(Phase::from_label("ao"), Phase::Aqueous);
    }

    #[test]
    fn odd_labels_survive_verbatim() {
        let phase = Phase::from_label("cr2");
        assert_eq!(phase, Phase::Unknown("cr2".to_string()));
        assert_eq!(phase.label(), "cr2");
        assert_eq!(phase.heating_ordinal(), None);
    }

    #[test]
    fn heating_ordinals() {
        assert_eq!(Phase::Solid.heating_ordinal(), Some(0));
        assert_eq!(Phase::Liquid.heating_ordinal(), Some(1));
        assert_eq!(Phase::Gas.heating_ordinal(), Some(2));
        assert_eq!(Phase::Aqueous.heating_ordinal(), None);
    }

    #[test]
    fn sort_priority_orders_gas_first() {
        assert!(Phase::Gas.sort_priority() < Phase::Liquid.sort_priority());
        assert!(Phase::Liquid.sort_priority() < Phase::Solid.sort_priority());
        assert!(Phase::Solid.sort_priority() < Phase::Aqueous.sort_priority());
    }
}
