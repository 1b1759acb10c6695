//! Tuluá (Valle del Cauca, Colombia) locations for realistic test fixtures.
//!
//! Approximate coordinates of well-known places around the town center.

use saferoute_planner::traits::Location;

pub const LOCALITY: &str = "Tuluá, Valle del Cauca, Colombia";

pub const PARQUE_BOYACA: Location = Location::new(4.0847, -76.1954);
pub const TERMINAL: Location = Location::new(4.0781, -76.1895);
pub const ESTADIO: Location = Location::new(4.0769, -76.2033);
pub const HOSPITAL: Location = Location::new(4.0925, -76.1983);

/// Address table for [`super::TableResolver`].
pub fn address_book() -> Vec<(&'static str, Location)> {
    vec![
        ("Parque Boyacá", PARQUE_BOYACA),
        ("Terminal de Transportes", TERMINAL),
        ("Estadio 12 de Octubre", ESTADIO),
        ("Hospital Tomás Uribe", HOSPITAL),
    ]
}
