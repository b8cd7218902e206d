//! Modèle des enregistrements gwl et de la liste de travail
//!
//! Le format gwl (Gemini WorkList) est un format texte à champs fixes,
//! d'après le Freedom EVOware Software Manual, 393172, v2.3 (2009).
//! Un enregistrement de pipetage comporte exactement onze champs joints
//! par `;`; un champ optionnel absent reste présent comme chaîne vide.

use crate::error::{Result, TransferError};
use serde::{Deserialize, Serialize};

/// Longueur maximale d'un champ texte gwl
const MAX_FIELD_LEN: usize = 32;

/// Volume maximal de pipetage en µL
const MAX_VOLUME: f64 = 7_158_278.0;

fn check_field(field: &'static str, value: &str) -> Result<()> {
    let len = value.chars().count();
    if len > MAX_FIELD_LEN {
        return Err(TransferError::FieldTooLong { field, len });
    }
    Ok(())
}

/// Enregistrement d'aspiration ou de distribution
///
/// Les quatre paramètres obligatoires sont le nom du portoir, son type,
/// la position du puits (indice Tecan, à partir de 1) et le volume en µL.
/// Le paramètre réservé `tip_type` est toujours sérialisé vide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipette {
    rack_label: String,
    rack_id: String,
    rack_type: String,
    position: u32,
    tube_id: String,
    volume: f64,
    liquid_class: String,
    tip_mask: Option<u8>,
    forced_rack_type: String,
}

impl Pipette {
    /// Crée un enregistrement de pipetage avec les champs obligatoires
    pub fn new(rack_label: &str, rack_type: &str, position: u32, volume: f64) -> Result<Self> {
        check_field("rack_label", rack_label)?;
        check_field("rack_type", rack_type)?;
        if !(0.0..=MAX_VOLUME).contains(&volume) {
            return Err(TransferError::VolumeOutOfRange(volume));
        }

        Ok(Self {
            rack_label: rack_label.to_string(),
            rack_id: String::new(),
            rack_type: rack_type.to_string(),
            position,
            tube_id: String::new(),
            volume,
            liquid_class: String::new(),
            tip_mask: None,
            forced_rack_type: String::new(),
        })
    }

    /// Définit le code-barres du portoir
    pub fn with_rack_id(mut self, rack_id: &str) -> Result<Self> {
        check_field("rack_id", rack_id)?;
        self.rack_id = rack_id.to_string();
        Ok(self)
    }

    /// Définit le code-barres du tube
    pub fn with_tube_id(mut self, tube_id: &str) -> Result<Self> {
        check_field("tube_id", tube_id)?;
        self.tube_id = tube_id.to_string();
        Ok(self)
    }

    /// Définit la classe de liquide
    pub fn with_liquid_class(mut self, liquid_class: &str) -> Result<Self> {
        check_field("liquid_class", liquid_class)?;
        self.liquid_class = liquid_class.to_string();
        Ok(self)
    }

    /// Définit le masque de pointes (1..128)
    pub fn with_tip_mask(mut self, tip_mask: u8) -> Result<Self> {
        if !(1..=128).contains(&tip_mask) {
            return Err(TransferError::InvalidTipMask(tip_mask));
        }
        self.tip_mask = Some(tip_mask);
        Ok(self)
    }

    /// Définit le type de portoir forcé
    pub fn with_forced_rack_type(mut self, forced_rack_type: &str) -> Result<Self> {
        check_field("forced_rack_type", forced_rack_type)?;
        self.forced_rack_type = forced_rack_type.to_string();
        Ok(self)
    }

    /// Position du puits dans le portoir
    pub fn position(&self) -> u32 {
        self.position
    }

    /// Volume de pipetage en µL
    pub fn volume(&self) -> f64 {
        self.volume
    }

    fn to_gwl(&self, type_character: char) -> String {
        let tip_mask = self.tip_mask.map(|m| m.to_string()).unwrap_or_default();
        // Onze champs, dans l'ordre fixé par le manuel; tip_type réservé vide
        [
            type_character.to_string(),
            self.rack_label.clone(),
            self.rack_id.clone(),
            self.rack_type.clone(),
            self.position.to_string(),
            self.tube_id.clone(),
            self.volume.to_string(),
            self.liquid_class.clone(),
            String::new(),
            tip_mask,
            self.forced_rack_type.clone(),
        ]
        .join(";")
    }
}

/// Enregistrement de lavage de pointes (WashTip / ReplaceDITI)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wash {
    scheme: Option<u32>,
}

impl Wash {
    /// Crée un enregistrement de lavage; sans schéma, le premier schéma
    /// de lavage de l'appareil est utilisé
    pub fn new(scheme: Option<u32>) -> Result<Self> {
        if let Some(0) = scheme {
            return Err(TransferError::InvalidWashScheme(0));
        }
        Ok(Self { scheme })
    }

    fn to_gwl(&self) -> String {
        match self.scheme {
            Some(scheme) => format!("W{};", scheme),
            None => "W;".to_string(),
        }
    }
}

/// Enregistrement gwl
///
/// Variante fermée remplaçant les classes informelles du format: chaque
/// enregistrement se sérialise par [`Record::to_gwl`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Record {
    Aspirate(Pipette),
    Dispense(Pipette),
    Wash(Wash),
}

impl Record {
    /// Sérialise l'enregistrement en une ligne gwl (sans fin de ligne)
    pub fn to_gwl(&self) -> String {
        match self {
            Record::Aspirate(pipette) => pipette.to_gwl('A'),
            Record::Dispense(pipette) => pipette.to_gwl('D'),
            Record::Wash(wash) => wash.to_gwl(),
        }
    }
}

/// Liste de travail: une suite ordonnée d'enregistrements gwl
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkList {
    name: String,
    records: Vec<Record>,
}

impl WorkList {
    /// Crée une liste de travail vide
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            records: Vec::new(),
        }
    }

    /// Crée une liste de travail à partir d'enregistrements existants
    pub fn with_records(name: &str, records: Vec<Record>) -> Self {
        Self {
            name: name.to_string(),
            records,
        }
    }

    /// Nom de la liste de travail
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ajoute un enregistrement en fin de liste
    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Enregistrements dans l'ordre d'insertion
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Nombre d'enregistrements
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Vrai si la liste est vide
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sérialise la liste complète: chaque enregistrement suivi d'une
    /// fin de ligne, dans l'ordre d'insertion
    pub fn to_gwl_string(&self) -> String {
        let mut output = String::new();
        for record in &self.records {
            output.push_str(&record.to_gwl());
            output.push('\n');
        }
        output
    }
}
