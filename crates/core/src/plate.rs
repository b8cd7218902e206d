//! Plaque de destination et registre de contenu par puits
//!
//! Chaque puits tient un registre étiquette de contenu -> masse cumulée,
//! plus un volume cumulé en litres. Les structures s'appuient sur des
//! `BTreeMap` pour garantir une itération déterministe.

use crate::error::Result;
use crate::wells::{index_to_wellname, wellname_to_index, PlateSize};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Registre de contenu d'un puits
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WellContent {
    /// Masse cumulée par étiquette de contenu
    quantities: BTreeMap<String, f64>,
    /// Volume cumulé en litres
    volume: f64,
}

impl WellContent {
    /// Ajoute une masse pour une étiquette, en créant l'entrée au besoin
    pub fn add_quantity(&mut self, label: &str, mass: f64) {
        *self.quantities.entry(label.to_string()).or_insert(0.0) += mass;
    }

    /// Ajoute un volume en litres
    pub fn add_volume(&mut self, volume_liters: f64) {
        self.volume += volume_liters;
    }

    /// Masse cumulée pour une étiquette
    pub fn quantity(&self, label: &str) -> Option<f64> {
        self.quantities.get(label).copied()
    }

    /// Registre complet étiquette -> masse
    pub fn quantities(&self) -> &BTreeMap<String, f64> {
        &self.quantities
    }

    /// Volume cumulé en litres
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Étiquettes de contenu, jointes par un espace
    pub fn components_as_string(&self) -> String {
        self.quantities
            .keys()
            .cloned()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Plaque multi-puits suivie pour son contenu cumulé
///
/// Les puits sont indexés par leur nom canonique (ex. "B3"); un puits
/// n'apparaît qu'après un premier ajout de contenu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plate {
    name: String,
    size: PlateSize,
    wells: BTreeMap<String, WellContent>,
}

impl Plate {
    /// Crée une plaque vide
    pub fn new(name: &str, size: PlateSize) -> Self {
        Self {
            name: name.to_string(),
            size,
            wells: BTreeMap::new(),
        }
    }

    /// Nom de la plaque
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Format de la plaque
    pub fn size(&self) -> PlateSize {
        self.size
    }

    /// Ajoute une masse et un volume au puits nommé
    ///
    /// Le nom est validé contre la géométrie de la plaque puis
    /// canonicalisé, de sorte que "b3" et "B3" désignent le même puits.
    pub fn add_content(
        &mut self,
        wellname: &str,
        label: &str,
        mass: f64,
        volume_liters: f64,
    ) -> Result<()> {
        let index = wellname_to_index(wellname, self.size)?;
        let canonical = index_to_wellname(index, self.size)?;

        let well = self.wells.entry(canonical).or_default();
        well.add_quantity(label, mass);
        well.add_volume(volume_liters);
        Ok(())
    }

    /// Contenu du puits nommé, s'il a reçu du contenu
    pub fn well(&self, wellname: &str) -> Option<&WellContent> {
        let index = wellname_to_index(wellname, self.size).ok()?;
        let canonical = index_to_wellname(index, self.size).ok()?;
        self.wells.get(&canonical)
    }

    /// Contenu du puits à l'indice column-major donné
    pub fn well_at_index(&self, index: u32) -> Result<Option<&WellContent>> {
        let wellname = index_to_wellname(index, self.size)?;
        Ok(self.wells.get(&wellname))
    }

    /// Puits remplis, par nom canonique, en ordre déterministe
    pub fn wells(&self) -> impl Iterator<Item = (&String, &WellContent)> {
        self.wells.iter()
    }

    /// Nombre de puits ayant reçu du contenu
    pub fn num_filled_wells(&self) -> usize {
        self.wells.len()
    }

    /// Exporte le registre de la plaque en JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
