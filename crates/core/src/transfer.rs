//! Compilateur de transferts
//!
//! Transforme une table de transferts ordonnée en une liste de travail
//! gwl (un triplet aspiration/distribution/lavage par ligne) et en une
//! plaque de destination comptabilisée. Les deux sorties partagent la
//! même résolution des puits de destination: une position d'instruction
//! et une entrée de registre désignent toujours le même puits physique.

use crate::error::{Result, TransferError};
use crate::gwl::{Pipette, Record, Wash, WorkList};
use crate::plate::Plate;
use crate::units;
use crate::wells::{index_to_wellname, wellname_to_index, PlateSize};
use serde::{Deserialize, Serialize};

/// Une ligne de la table de transferts
///
/// Les lignes sont construites en amont (champs numériques déjà typés)
/// et ne sont plus modifiées; leur ordre relatif détermine l'affectation
/// des puits de destination en mode implicite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRow {
    pub source_well: String,
    pub source_plate_name: String,
    pub source_plate_type: String,
    /// Nombre de puits de la plaque source, 96 ou 384
    pub source_plate_size: u32,
    /// Étiquette du contenu du puits source (requis pour la comptabilité)
    pub source_well_content: Option<String>,
    /// Concentration du puits source (requise pour la comptabilité)
    pub source_well_concentration: Option<f64>,
    /// Volume à transférer en µL
    pub volume_to_transfer: f64,
    pub destination_plate_name: String,
    pub destination_plate_type: String,
    /// Nombre de puits de la plaque de destination, 96 ou 384
    pub destination_plate_size: u32,
    /// Puits de destination explicite, utilisé si la configuration
    /// l'indique
    pub destination_well: Option<String>,
}

/// Configuration d'une compilation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompileConfig {
    /// Premier puits de destination (indice Tecan, à partir de 1);
    /// ignoré si les puits de destination sont explicites
    pub starting_well: u32,
    /// Schéma de lavage appliqué à chaque enregistrement W du lot
    pub washing_scheme: Option<u32>,
    /// Lire le puits de destination dans la colonne `destination_well`
    /// plutôt que d'affecter les puits séquentiellement
    pub destination_specified: bool,
    /// Facteur concentration -> masse, selon l'unité de la concentration
    pub mass_unit_factor: f64,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            starting_well: 1,
            washing_scheme: None,
            destination_specified: false,
            mass_unit_factor: units::NANOGRAM_PER_MICROLITER,
        }
    }
}

/// Résultat d'une compilation
#[derive(Debug, Clone)]
pub struct CompileOutput {
    /// Liste de travail gwl, un triplet par ligne de la table
    pub worklist: WorkList,
    /// Plaque de destination comptabilisée; `None` si la comptabilité
    /// a été ignorée faute de contenu ou de concentration
    pub plate: Option<Plate>,
    /// Compte rendu lisible de la compilation
    pub report: String,
}

/// Compilateur de tables de transferts
pub struct WorkListCompiler {
    config: CompileConfig,
}

impl WorkListCompiler {
    /// Crée un compilateur avec la configuration donnée
    pub fn new(config: CompileConfig) -> Self {
        Self { config }
    }

    /// Configuration actuelle
    pub fn config(&self) -> &CompileConfig {
        &self.config
    }

    /// Compile une table de transferts
    ///
    /// Les invariants de table (une seule plaque de destination, tailles
    /// dans {96, 384}, capacité en mode implicite) sont vérifiés avant
    /// toute production: un échec structurel ne retourne rien de partiel.
    /// Une ligne sans contenu ou sans concentration ne fait échouer que
    /// la comptabilité: la liste de travail est quand même retournée et
    /// le compte rendu le signale.
    pub fn compile(
        &self,
        name: &str,
        rows: &[TransferRow],
        destination_plate: Option<Plate>,
    ) -> Result<CompileOutput> {
        let destination_size = validate_table(rows)?;

        if let Some(plate) = &destination_plate {
            if plate.size() != destination_size {
                return Err(TransferError::DestinationPlateMismatch {
                    expected: destination_size.num_wells(),
                    actual: plate.size().num_wells(),
                });
            }
        }

        if self.config.destination_specified {
            tracing::debug!("puits de destination explicites: starting_well ignoré");
        }

        let destinations = self.resolve_destinations(rows, destination_size)?;
        let wash = Wash::new(self.config.washing_scheme)?;

        tracing::info!(
            worklist = name,
            transfers = rows.len(),
            "compilation de la table de transferts"
        );

        let mut worklist = WorkList::new(name);
        for (row, (destination_index, _)) in rows.iter().zip(&destinations) {
            let source_size = PlateSize::from_wells(row.source_plate_size)?;
            let source_index = wellname_to_index(&row.source_well, source_size)?;

            let aspirate = Pipette::new(
                &row.source_plate_name,
                &row.source_plate_type,
                source_index,
                row.volume_to_transfer,
            )?;
            let dispense = Pipette::new(
                &row.destination_plate_name,
                &row.destination_plate_type,
                *destination_index,
                row.volume_to_transfer,
            )?;

            worklist.push(Record::Aspirate(aspirate));
            worklist.push(Record::Dispense(dispense));
            worklist.push(Record::Wash(wash.clone()));
        }

        let mut report = String::new();
        if !self.config.destination_specified {
            report.push_str(&format!(
                "La position du premier puits de destination est {} ({}).\n",
                self.config.starting_well, destinations[0].1
            ));
        }
        report.push_str(&format!("{} transferts listés dans le gwl.\n", rows.len()));

        let plate = match self.build_destination_plate(
            name,
            rows,
            &destinations,
            destination_size,
            destination_plate,
        ) {
            Ok(plate) => Some(plate),
            Err(error) if error.is_content_error() => {
                tracing::warn!(%error, "comptabilité de contenu ignorée");
                report.push_str("\nPlaque de destination non créée.\n");
                None
            }
            Err(error) => return Err(error),
        };

        Ok(CompileOutput {
            worklist,
            plate,
            report,
        })
    }

    /// Résout l'indice et le nom canonique du puits de destination de
    /// chaque ligne, dans l'ordre de la table
    fn resolve_destinations(
        &self,
        rows: &[TransferRow],
        size: PlateSize,
    ) -> Result<Vec<(u32, String)>> {
        if self.config.destination_specified {
            rows.iter()
                .enumerate()
                .map(|(row, entry)| {
                    let wellname = entry
                        .destination_well
                        .as_deref()
                        .ok_or(TransferError::MissingDestinationWell { row })?;
                    let index = wellname_to_index(wellname, size)?;
                    let canonical = index_to_wellname(index, size)?;
                    Ok((index, canonical))
                })
                .collect()
        } else {
            let starting_well = self.config.starting_well;
            let last = starting_well as u64 + rows.len() as u64 - 1;
            if last > size.num_wells() as u64 {
                return Err(TransferError::CapacityExceeded {
                    starting_well,
                    rows: rows.len(),
                    num_wells: size.num_wells(),
                });
            }

            (0..rows.len() as u32)
                .map(|offset| {
                    let index = starting_well + offset;
                    Ok((index, index_to_wellname(index, size)?))
                })
                .collect()
        }
    }

    /// Construit ou complète la plaque de destination à partir des mêmes
    /// puits résolus que la liste de travail
    fn build_destination_plate(
        &self,
        name: &str,
        rows: &[TransferRow],
        destinations: &[(u32, String)],
        size: PlateSize,
        existing: Option<Plate>,
    ) -> Result<Plate> {
        // Précondition sur toute la table avant la moindre écriture:
        // aucune ligne n'est ignorée silencieusement
        let mut contents = Vec::with_capacity(rows.len());
        for (row, entry) in rows.iter().enumerate() {
            let label = entry
                .source_well_content
                .as_deref()
                .ok_or(TransferError::MissingContent { row })?;
            let concentration = entry
                .source_well_concentration
                .ok_or(TransferError::MissingConcentration { row })?;
            contents.push((label, concentration));
        }

        let mut plate = existing.unwrap_or_else(|| Plate::new(name, size));
        for ((entry, (label, concentration)), (_, wellname)) in
            rows.iter().zip(contents).zip(destinations)
        {
            let mass = units::transfer_mass(
                entry.volume_to_transfer,
                concentration,
                self.config.mass_unit_factor,
            );
            let volume_liters = units::volume_to_liters(entry.volume_to_transfer);
            plate.add_content(wellname, label, mass, volume_liters)?;
        }

        Ok(plate)
    }
}

/// Vérifie les invariants de table et retourne la géométrie de
/// destination
fn validate_table(rows: &[TransferRow]) -> Result<PlateSize> {
    let first = rows.first().ok_or(TransferError::EmptyTable)?;

    if rows
        .iter()
        .any(|r| r.destination_plate_name != first.destination_plate_name)
    {
        return Err(TransferError::MultipleDestinations {
            field: "destination_plate_name",
        });
    }
    if rows
        .iter()
        .any(|r| r.destination_plate_type != first.destination_plate_type)
    {
        return Err(TransferError::MultipleDestinations {
            field: "destination_plate_type",
        });
    }
    if rows
        .iter()
        .any(|r| r.destination_plate_size != first.destination_plate_size)
    {
        return Err(TransferError::MultipleDestinations {
            field: "destination_plate_size",
        });
    }

    let size = PlateSize::from_wells(first.destination_plate_size)?;
    for row in rows {
        PlateSize::from_wells(row.source_plate_size)?;
    }

    Ok(size)
}
