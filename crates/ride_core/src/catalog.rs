//! Static booking data: vehicle classes, the suggestion landmarks shown in
//! the booking panel, and the captain roster the simulator draws from.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleClass {
    Bike,
    Auto,
    Cab,
}

impl VehicleClass {
    pub fn as_str(self) -> &'static str {
        match self {
            VehicleClass::Bike => "bike",
            VehicleClass::Auto => "auto",
            VehicleClass::Cab => "cab",
        }
    }
}

impl fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleClass {
    type Err = UnknownVehicleClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bike" => Ok(VehicleClass::Bike),
            "auto" => Ok(VehicleClass::Auto),
            "cab" => Ok(VehicleClass::Cab),
            other => Err(UnknownVehicleClass(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown vehicle class {0:?} (expected bike, auto or cab)")]
pub struct UnknownVehicleClass(pub String);

/// One bookable ride option. The catalog is static; fares are flat mock
/// prices, not computed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleOption {
    pub class: VehicleClass,
    pub display_name: &'static str,
    pub description: &'static str,
    pub eta_minutes: u32,
    pub fare_rupees: u32,
}

pub const VEHICLE_CATALOG: [VehicleOption; 3] = [
    VehicleOption {
        class: VehicleClass::Bike,
        display_name: "Bike",
        description: "Fastest way to beat traffic",
        eta_minutes: 2,
        fare_rupees: 45,
    },
    VehicleOption {
        class: VehicleClass::Auto,
        display_name: "Auto",
        description: "Comfortable & open air",
        eta_minutes: 5,
        fare_rupees: 90,
    },
    VehicleOption {
        class: VehicleClass::Cab,
        display_name: "Cab",
        description: "AC ride with music",
        eta_minutes: 8,
        fare_rupees: 180,
    },
];

pub fn vehicle_option(class: VehicleClass) -> VehicleOption {
    VEHICLE_CATALOG
        .iter()
        .copied()
        .find(|option| option.class == class)
        .unwrap_or(VEHICLE_CATALOG[0])
}

/// Landmarks offered by the booking panel's suggestion list (Hyderabad).
pub fn suggested_locations() -> Vec<Coordinate> {
    vec![
        Coordinate::new(17.4483, 78.3488, "Gachibowli DLF"),
        Coordinate::new(17.4474, 78.3814, "Hitech City Metro"),
        Coordinate::new(17.4150, 78.4411, "Banjara Hills Rd 1"),
        Coordinate::new(17.4278, 78.4116, "Jubilee Hills Check Post"),
        Coordinate::new(17.3616, 78.4747, "Charminar"),
    ]
}

/// Name and vehicle plate pairs the simulator fabricates captains from.
pub fn captain_roster(class: VehicleClass) -> &'static [(&'static str, &'static str)] {
    match class {
        VehicleClass::Bike => &[
            ("Rajesh Kumar", "Honda Shine - TS 09 EA 1234"),
            ("Srinivas Reddy", "TVS Apache - TS 12 FK 0921"),
            ("Mohammed Irfan", "Bajaj Pulsar - TS 07 HH 4410"),
        ],
        VehicleClass::Auto => &[
            ("Venkatesh G", "Bajaj RE - TS 11 UB 3344"),
            ("Anil Yadav", "Piaggio Ape - TS 13 UC 7182"),
        ],
        VehicleClass::Cab => &[
            ("Praveen Chary", "Maruti Dzire - TS 09 TC 5521"),
            ("Suresh Babu", "Hyundai Aura - TS 10 TD 9098"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_covers_every_class_exactly_once() {
        for class in [VehicleClass::Bike, VehicleClass::Auto, VehicleClass::Cab] {
            assert_eq!(vehicle_option(class).class, class);
            assert!(!captain_roster(class).is_empty());
        }
        assert_eq!(VEHICLE_CATALOG.len(), 3);
    }

    #[test]
    fn vehicle_class_parses_from_id() {
        assert_eq!("bike".parse::<VehicleClass>().unwrap(), VehicleClass::Bike);
        assert_eq!("cab".parse::<VehicleClass>().unwrap(), VehicleClass::Cab);
        assert!("rickshaw".parse::<VehicleClass>().is_err());
    }

    #[test]
    fn suggestions_are_labelled_landmarks() {
        let suggestions = suggested_locations();
        assert_eq!(suggestions.len(), 5);
        assert!(suggestions.iter().all(|c| !c.label.is_empty()));
    }
}
