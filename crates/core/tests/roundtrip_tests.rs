//! Propriétés de la bijection puits <-> indice et du format gwl
//!
//! Le mapping nom de puits <-> indice doit être une bijection exacte
//! pour chaque géométrie, et chaque enregistrement sérialisé doit
//! respecter le nombre de champs du format.

use plaque_core::{index_to_wellname, wellname_to_index, PlateSize};
use plaque_core::{Pipette, Record, Wash};
use proptest::prelude::*;

proptest! {
    #[test]
    fn roundtrip_index_96(index in 1u32..=96) {
        let wellname = index_to_wellname(index, PlateSize::Wells96).unwrap();
        prop_assert_eq!(
            wellname_to_index(&wellname, PlateSize::Wells96).unwrap(),
            index
        );
    }

    #[test]
    fn roundtrip_index_384(index in 1u32..=384) {
        let wellname = index_to_wellname(index, PlateSize::Wells384).unwrap();
        prop_assert_eq!(
            wellname_to_index(&wellname, PlateSize::Wells384).unwrap(),
            index
        );
    }

    #[test]
    fn roundtrip_wellname_96(row in 0u32..8, column in 1u32..=12) {
        let wellname = format!("{}{}", (b'A' + row as u8) as char, column);
        let index = wellname_to_index(&wellname, PlateSize::Wells96).unwrap();
        prop_assert_eq!(
            index_to_wellname(index, PlateSize::Wells96).unwrap(),
            wellname
        );
    }

    #[test]
    fn roundtrip_wellname_384(row in 0u32..16, column in 1u32..=24) {
        let wellname = format!("{}{}", (b'A' + row as u8) as char, column);
        let index = wellname_to_index(&wellname, PlateSize::Wells384).unwrap();
        prop_assert_eq!(
            index_to_wellname(index, PlateSize::Wells384).unwrap(),
            wellname
        );
    }

    #[test]
    fn pipette_always_eleven_fields(
        rack_label in "[A-Za-z0-9 /-]{1,32}",
        rack_type in "[A-Za-z0-9 /-]{1,32}",
        position in 1u32..=384,
        volume in 0.0f64..=7_158_278.0,
    ) {
        let pipette = Pipette::new(&rack_label, &rack_type, position, volume).unwrap();
        let line = Record::Dispense(pipette).to_gwl();
        prop_assert_eq!(line.matches(';').count(), 10);
        prop_assert!(line.starts_with("D;"));
    }

    #[test]
    fn wash_matches_format(scheme in proptest::option::of(1u32..=4)) {
        let line = Record::Wash(Wash::new(scheme).unwrap()).to_gwl();
        // W\d*;
        prop_assert!(line.starts_with('W'));
        prop_assert!(line.ends_with(';'));
        prop_assert!(line[1..line.len() - 1].bytes().all(|b| b.is_ascii_digit()));
    }
}
