//! Types d'erreurs pour la compilation de listes de travail

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransferError {
    #[error("La table de transferts est vide")]
    EmptyTable,

    #[error("Une seule plaque de destination est autorisée: champ '{field}' non unique")]
    MultipleDestinations { field: &'static str },

    #[error("Taille de plaque non supportée: {0} (seulement 96 ou 384 puits)")]
    UnsupportedPlateSize(u32),

    #[error(
        "Transfert impossible: puits de départ {starting_well} trop élevé \
         pour {rows} transferts sur une plaque de {num_wells} puits"
    )]
    CapacityExceeded {
        starting_well: u32,
        rows: usize,
        num_wells: u32,
    },

    #[error("Nom de puits invalide: '{name}' pour une plaque de {num_wells} puits")]
    InvalidWellName { name: String, num_wells: u32 },

    #[error("Indice de puits hors plage: {index} pas dans [1, {num_wells}]")]
    WellIndexOutOfRange { index: u32, num_wells: u32 },

    #[error("Puits de destination manquant à la ligne {row}")]
    MissingDestinationWell { row: usize },

    #[error(
        "La plaque de destination fournie a {actual} puits, \
         la table en demande {expected}"
    )]
    DestinationPlateMismatch { expected: u32, actual: u32 },

    #[error("Champ gwl '{field}' trop long: {len} > 32 caractères")]
    FieldTooLong { field: &'static str, len: usize },

    #[error("Volume hors plage: {0} pas dans [0, 7158278] µL")]
    VolumeOutOfRange(f64),

    #[error("Masque de pointe invalide: {0} pas dans [1, 128]")]
    InvalidTipMask(u8),

    #[error("Schéma de lavage invalide: {0} (doit être strictement positif)")]
    InvalidWashScheme(u32),

    #[error("Contenu du puits source manquant à la ligne {row}")]
    MissingContent { row: usize },

    #[error("Concentration du puits source manquante à la ligne {row}")]
    MissingConcentration { row: usize },

    #[error("Erreur de sérialisation: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TransferError {
    /// Vrai pour la classe d'erreurs locale à la comptabilité de contenu.
    ///
    /// Ces erreurs n'empêchent pas la liste de travail d'être produite;
    /// toutes les autres variantes sont structurelles et fatales.
    pub fn is_content_error(&self) -> bool {
        matches!(
            self,
            TransferError::MissingContent { .. } | TransferError::MissingConcentration { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, TransferError>;
