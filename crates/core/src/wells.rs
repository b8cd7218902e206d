//! Géométrie des plaques et conversion nom de puits <-> indice
//!
//! L'indice est linéaire et « column-major »: il descend chaque colonne
//! avant de passer à la colonne suivante. Pour une plaque 96 puits,
//! A1 -> 1, B1 -> 2, ..., H1 -> 8, A2 -> 9.

use crate::error::{Result, TransferError};
use serde::{Deserialize, Serialize};

/// Format de plaque supporté
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlateSize {
    /// 96 puits (8 rangées x 12 colonnes, A1..H12)
    Wells96,
    /// 384 puits (16 rangées x 24 colonnes, A1..P24)
    Wells384,
}

impl PlateSize {
    /// Construit une taille de plaque depuis un nombre de puits
    pub fn from_wells(num_wells: u32) -> Result<Self> {
        match num_wells {
            96 => Ok(PlateSize::Wells96),
            384 => Ok(PlateSize::Wells384),
            other => Err(TransferError::UnsupportedPlateSize(other)),
        }
    }

    /// Nombre total de puits
    pub fn num_wells(self) -> u32 {
        match self {
            PlateSize::Wells96 => 96,
            PlateSize::Wells384 => 384,
        }
    }

    /// Nombre de rangées (lettres)
    pub fn num_rows(self) -> u32 {
        match self {
            PlateSize::Wells96 => 8,
            PlateSize::Wells384 => 16,
        }
    }

    /// Nombre de colonnes (chiffres)
    pub fn num_columns(self) -> u32 {
        match self {
            PlateSize::Wells96 => 12,
            PlateSize::Wells384 => 24,
        }
    }
}

/// Convertit un nom de puits (ex. "B3") en indice linéaire column-major
///
/// La lettre de rangée est insensible à la casse. Retourne
/// [`TransferError::InvalidWellName`] si le nom ne correspond pas à la
/// géométrie demandée.
pub fn wellname_to_index(wellname: &str, size: PlateSize) -> Result<u32> {
    let invalid = || TransferError::InvalidWellName {
        name: wellname.to_string(),
        num_wells: size.num_wells(),
    };

    let mut chars = wellname.chars();
    let row_letter = chars.next().ok_or_else(|| invalid())?;
    if !row_letter.is_ascii_alphabetic() {
        return Err(invalid());
    }
    let row = (row_letter.to_ascii_uppercase() as u32) - ('A' as u32) + 1;
    if row > size.num_rows() {
        return Err(invalid());
    }

    let column_digits = chars.as_str();
    if column_digits.is_empty() || !column_digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let column: u32 = column_digits.parse().map_err(|_| invalid())?;
    if column == 0 || column > size.num_columns() {
        return Err(invalid());
    }

    Ok((column - 1) * size.num_rows() + row)
}

/// Convertit un indice linéaire column-major en nom de puits
///
/// Inverse exact de [`wellname_to_index`] pour tout indice de
/// `[1, num_wells]`.
pub fn index_to_wellname(index: u32, size: PlateSize) -> Result<String> {
    if index == 0 || index > size.num_wells() {
        return Err(TransferError::WellIndexOutOfRange {
            index,
            num_wells: size.num_wells(),
        });
    }

    let zero_based = index - 1;
    let column = zero_based / size.num_rows() + 1;
    let row_letter = (b'A' + (zero_based % size.num_rows()) as u8) as char;

    Ok(format!("{}{}", row_letter, column))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_major_96() {
        assert_eq!(wellname_to_index("A1", PlateSize::Wells96).unwrap(), 1);
        assert_eq!(wellname_to_index("B1", PlateSize::Wells96).unwrap(), 2);
        assert_eq!(wellname_to_index("H1", PlateSize::Wells96).unwrap(), 8);
        assert_eq!(wellname_to_index("A2", PlateSize::Wells96).unwrap(), 9);
        assert_eq!(wellname_to_index("H12", PlateSize::Wells96).unwrap(), 96);
    }

    #[test]
    fn test_column_major_384() {
        assert_eq!(wellname_to_index("A1", PlateSize::Wells384).unwrap(), 1);
        assert_eq!(wellname_to_index("P1", PlateSize::Wells384).unwrap(), 16);
        assert_eq!(wellname_to_index("A2", PlateSize::Wells384).unwrap(), 17);
        assert_eq!(wellname_to_index("P24", PlateSize::Wells384).unwrap(), 384);
    }

    #[test]
    fn test_lowercase_accepted() {
        assert_eq!(wellname_to_index("b3", PlateSize::Wells96).unwrap(), 18);
    }

    #[test]
    fn test_index_to_wellname() {
        assert_eq!(index_to_wellname(1, PlateSize::Wells96).unwrap(), "A1");
        assert_eq!(index_to_wellname(9, PlateSize::Wells96).unwrap(), "A2");
        assert_eq!(index_to_wellname(96, PlateSize::Wells96).unwrap(), "H12");
        assert_eq!(index_to_wellname(17, PlateSize::Wells384).unwrap(), "A2");
    }

    #[test]
    fn test_invalid_wellnames() {
        // Rangée hors géométrie: I n'existe pas sur une plaque 96 puits
        assert!(wellname_to_index("I1", PlateSize::Wells96).is_err());
        assert!(wellname_to_index("A0", PlateSize::Wells96).is_err());
        assert!(wellname_to_index("A13", PlateSize::Wells96).is_err());
        assert!(wellname_to_index("A25", PlateSize::Wells384).is_err());
        assert!(wellname_to_index("", PlateSize::Wells96).is_err());
        assert!(wellname_to_index("12", PlateSize::Wells96).is_err());
        assert!(wellname_to_index("AB", PlateSize::Wells96).is_err());
    }

    #[test]
    fn test_index_out_of_range() {
        assert!(index_to_wellname(0, PlateSize::Wells96).is_err());
        assert!(index_to_wellname(97, PlateSize::Wells96).is_err());
        assert!(index_to_wellname(385, PlateSize::Wells384).is_err());
    }

    #[test]
    fn test_from_wells() {
        assert_eq!(PlateSize::from_wells(96).unwrap(), PlateSize::Wells96);
        assert_eq!(PlateSize::from_wells(384).unwrap(), PlateSize::Wells384);
        assert!(PlateSize::from_wells(48).is_err());
    }
}
