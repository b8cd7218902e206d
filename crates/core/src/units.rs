//! Conversions d'unités pour la comptabilité des transferts
//!
//! Les volumes de la table de transferts sont en µL; le registre de
//! contenu des puits est tenu en litres et en unité de masse. Le facteur
//! concentration -> masse dépend de l'unité de la concentration fournie
//! et se configure dans [`crate::transfer::CompileConfig`].

/// Facteur µL -> L
pub const MICROLITER_TO_LITER: f64 = 1e-6;

/// Facteur de masse pour des concentrations en ng/µL (défaut)
pub const NANOGRAM_PER_MICROLITER: f64 = 1e-9;

/// Facteur de masse pour des concentrations en µg/µL
/// (unité des feuilles de livraison GeneART)
pub const MICROGRAM_PER_MICROLITER: f64 = 1e-6;

/// Convertit un volume en µL vers des litres
pub fn volume_to_liters(volume_microliters: f64) -> f64 {
    volume_microliters * MICROLITER_TO_LITER
}

/// Masse transférée pour un volume en µL et une concentration donnée
pub fn transfer_mass(volume_microliters: f64, concentration: f64, mass_unit_factor: f64) -> f64 {
    volume_microliters * concentration * mass_unit_factor
}
