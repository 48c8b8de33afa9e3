//! Static country -> continent lookup.
//!
//! Keys are the `Country/Region` spellings used by the source tables. Any name
//! not in the table resolves to [`Continent::Other`], so every country lands in
//! exactly one bucket.

use phf::phf_map;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Continent {
    Africa,
    Asia,
    Europe,
    #[serde(rename = "North America")]
    NorthAmerica,
    #[serde(rename = "South America")]
    SouthAmerica,
    Oceania,
    /// Fallback for cruise ships, events and unrecognized names.
    Other,
}

impl Continent {
    pub const ALL: [Continent; 7] = [
        Continent::Africa,
        Continent::Asia,
        Continent::Europe,
        Continent::NorthAmerica,
        Continent::SouthAmerica,
        Continent::Oceania,
        Continent::Other,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Continent::Africa => "Africa",
            Continent::Asia => "Asia",
            Continent::Europe => "Europe",
            Continent::NorthAmerica => "North America",
            Continent::SouthAmerica => "South America",
            Continent::Oceania => "Oceania",
            Continent::Other => "Other",
        }
    }
}

impl fmt::Display for Continent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Continent for a source country name, [`Continent::Other`] when unmapped.
pub fn continent_of(country: &str) -> Continent {
    COUNTRY_CONTINENTS
        .get(country)
        .copied()
        .unwrap_or(Continent::Other)
}

/// Whether `country` has an explicit entry (as opposed to the fallback).
pub fn is_mapped(country: &str) -> bool {
    COUNTRY_CONTINENTS.contains_key(country)
}

/// Mapped country names for one continent, unordered.
pub fn countries_in(continent: Continent) -> impl Iterator<Item = &'static str> {
    COUNTRY_CONTINENTS
        .entries()
        .filter(move |(_, c)| **c == continent)
        .map(|(name, _)| *name)
}

pub static COUNTRY_CONTINENTS: phf::Map<&'static str, Continent> = phf_map! {
    // Africa
    "Algeria" => Continent::Africa,
    "Angola" => Continent::Africa,
    "Benin" => Continent::Africa,
    "Botswana" => Continent::Africa,
    "Burkina Faso" => Continent::Africa,
    "Burundi" => Continent::Africa,
    "Cabo Verde" => Continent::Africa,
    "Cameroon" => Continent::Africa,
    "Central African Republic" => Continent::Africa,
    "Chad" => Continent::Africa,
    "Comoros" => Continent::Africa,
    "Congo (Brazzaville)" => Continent::Africa,
    "Congo (Kinshasa)" => Continent::Africa,
    "Cote d'Ivoire" => Continent::Africa,
    "Djibouti" => Continent::Africa,
    "Egypt" => Continent::Africa,
    "Equatorial Guinea" => Continent::Africa,
    "Eritrea" => Continent::Africa,
    "Eswatini" => Continent::Africa,
    "Ethiopia" => Continent::Africa,
    "Gabon" => Continent::Africa,
    "Gambia" => Continent::Africa,
    "Ghana" => Continent::Africa,
    "Guinea" => Continent::Africa,
    "Guinea-Bissau" => Continent::Africa,
    "Kenya" => Continent::Africa,
    "Lesotho" => Continent::Africa,
    "Liberia" => Continent::Africa,
    "Libya" => Continent::Africa,
    "Madagascar" => Continent::Africa,
    "Malawi" => Continent::Africa,
    "Mali" => Continent::Africa,
    "Mauritania" => Continent::Africa,
    "Mauritius" => Continent::Africa,
    "Morocco" => Continent::Africa,
    "Mozambique" => Continent::Africa,
    "Namibia" => Continent::Africa,
    "Niger" => Continent::Africa,
    "Nigeria" => Continent::Africa,
    "Rwanda" => Continent::Africa,
    "Sao Tome and Principe" => Continent::Africa,
    "Senegal" => Continent::Africa,
    "Seychelles" => Continent::Africa,
    "Sierra Leone" => Continent::Africa,
    "Somalia" => Continent::Africa,
    "South Africa" => Continent::Africa,
    "South Sudan" => Continent::Africa,
    "Sudan" => Continent::Africa,
    "Tanzania" => Continent::Africa,
    "Togo" => Continent::Africa,
    "Tunisia" => Continent::Africa,
    "Uganda" => Continent::Africa,
    "Western Sahara" => Continent::Africa,
    "Zambia" => Continent::Africa,
    "Zimbabwe" => Continent::Africa,

    // Asia
    "Afghanistan" => Continent::Asia,
    "Armenia" => Continent::Asia,
    "Azerbaijan" => Continent::Asia,
    "Bahrain" => Continent::Asia,
    "Bangladesh" => Continent::Asia,
    "Bhutan" => Continent::Asia,
    "Brunei" => Continent::Asia,
    "Burma" => Continent::Asia,
    "Cambodia" => Continent::Asia,
    "China" => Continent::Asia,
    "Georgia" => Continent::Asia,
    "India" => Continent::Asia,
    "Indonesia" => Continent::Asia,
    "Iran" => Continent::Asia,
    "Iraq" => Continent::Asia,
    "Israel" => Continent::Asia,
    "Japan" => Continent::Asia,
    "Jordan" => Continent::Asia,
    "Kazakhstan" => Continent::Asia,
    "Korea, North" => Continent::Asia,
    "Korea, South" => Continent::Asia,
    "Kuwait" => Continent::Asia,
    "Kyrgyzstan" => Continent::Asia,
    "Laos" => Continent::Asia,
    "Lebanon" => Continent::Asia,
    "Malaysia" => Continent::Asia,
    "Maldives" => Continent::Asia,
    "Mongolia" => Continent::Asia,
    "Nepal" => Continent::Asia,
    "Oman" => Continent::Asia,
    "Pakistan" => Continent::Asia,
    "Philippines" => Continent::Asia,
    "Qatar" => Continent::Asia,
    "Saudi Arabia" => Continent::Asia,
    "Singapore" => Continent::Asia,
    "Sri Lanka" => Continent::Asia,
    "Syria" => Continent::Asia,
    "Taiwan*" => Continent::Asia,
    "Tajikistan" => Continent::Asia,
    "Thailand" => Continent::Asia,
    "Timor-Leste" => Continent::Asia,
    "Turkey" => Continent::Asia,
    "United Arab Emirates" => Continent::Asia,
    "Uzbekistan" => Continent::Asia,
    "Vietnam" => Continent::Asia,
    "West Bank and Gaza" => Continent::Asia,
    "Yemen" => Continent::Asia,

    // Europe
    "Albania" => Continent::Europe,
    "Andorra" => Continent::Europe,
    "Austria" => Continent::Europe,
    "Belarus" => Continent::Europe,
    "Belgium" => Continent::Europe,
    "Bosnia and Herzegovina" => Continent::Europe,
    "Bulgaria" => Continent::Europe,
    "Croatia" => Continent::Europe,
    "Cyprus" => Continent::Europe,
    "Czechia" => Continent::Europe,
    "Denmark" => Continent::Europe,
    "Estonia" => Continent::Europe,
    "Finland" => Continent::Europe,
    "France" => Continent::Europe,
    "Germany" => Continent::Europe,
    "Greece" => Continent::Europe,
    "Holy See" => Continent::Europe,
    "Hungary" => Continent::Europe,
    "Iceland" => Continent::Europe,
    "Ireland" => Continent::Europe,
    "Italy" => Continent::Europe,
    "Kosovo" => Continent::Europe,
    "Latvia" => Continent::Europe,
    "Liechtenstein" => Continent::Europe,
    "Lithuania" => Continent::Europe,
    "Luxembourg" => Continent::Europe,
    "Malta" => Continent::Europe,
    "Moldova" => Continent::Europe,
    "Monaco" => Continent::Europe,
    "Montenegro" => Continent::Europe,
    "Netherlands" => Continent::Europe,
    "North Macedonia" => Continent::Europe,
    "Norway" => Continent::Europe,
    "Poland" => Continent::Europe,
    "Portugal" => Continent::Europe,
    "Romania" => Continent::Europe,
    "Russia" => Continent::Europe,
    "San Marino" => Continent::Europe,
    "Serbia" => Continent::Europe,
    "Slovakia" => Continent::Europe,
    "Slovenia" => Continent::Europe,
    "Spain" => Continent::Europe,
    "Sweden" => Continent::Europe,
    "Switzerland" => Continent::Europe,
    "Ukraine" => Continent::Europe,
    "United Kingdom" => Continent::Europe,

    // North America (incl. Central America and the Caribbean)
    "Antigua and Barbuda" => Continent::NorthAmerica,
    "Bahamas" => Continent::NorthAmerica,
    "Barbados" => Continent::NorthAmerica,
    "Belize" => Continent::NorthAmerica,
    "Canada" => Continent::NorthAmerica,
    "Costa Rica" => Continent::NorthAmerica,
    "Cuba" => Continent::NorthAmerica,
    "Dominica" => Continent::NorthAmerica,
    "Dominican Republic" => Continent::NorthAmerica,
    "El Salvador" => Continent::NorthAmerica,
    "Grenada" => Continent::NorthAmerica,
    "Guatemala" => Continent::NorthAmerica,
    "Haiti" => Continent::NorthAmerica,
    "Honduras" => Continent::NorthAmerica,
    "Jamaica" => Continent::NorthAmerica,
    "Mexico" => Continent::NorthAmerica,
    "Nicaragua" => Continent::NorthAmerica,
    "Panama" => Continent::NorthAmerica,
    "Saint Kitts and Nevis" => Continent::NorthAmerica,
    "Saint Lucia" => Continent::NorthAmerica,
    "Saint Vincent and the Grenadines" => Continent::NorthAmerica,
    "Trinidad and Tobago" => Continent::NorthAmerica,
    "US" => Continent::NorthAmerica,

    // South America
    "Argentina" => Continent::SouthAmerica,
    "Bolivia" => Continent::SouthAmerica,
    "Brazil" => Continent::SouthAmerica,
    "Chile" => Continent::SouthAmerica,
    "Colombia" => Continent::SouthAmerica,
    "Ecuador" => Continent::SouthAmerica,
    "Guyana" => Continent::SouthAmerica,
    "Paraguay" => Continent::SouthAmerica,
    "Peru" => Continent::SouthAmerica,
    "Suriname" => Continent::SouthAmerica,
    "Uruguay" => Continent::SouthAmerica,
    "Venezuela" => Continent::SouthAmerica,

    // Oceania
    "Australia" => Continent::Oceania,
    "Fiji" => Continent::Oceania,
    "Kiribati" => Continent::Oceania,
    "Marshall Islands" => Continent::Oceania,
    "Micronesia" => Continent::Oceania,
    "Nauru" => Continent::Oceania,
    "New Zealand" => Continent::Oceania,
    "Palau" => Continent::Oceania,
    "Papua New Guinea" => Continent::Oceania,
    "Samoa" => Continent::Oceania,
    "Solomon Islands" => Continent::Oceania,
    "Tonga" => Continent::Oceania,
    "Tuvalu" => Continent::Oceania,
    "Vanuatu" => Continent::Oceania,

    // Non-territorial entries present in the source tables
    "Antarctica" => Continent::Other,
    "Diamond Princess" => Continent::Other,
    "MS Zaandam" => Continent::Other,
    "Summer Olympics 2020" => Continent::Other,
    "Winter Olympics 2022" => Continent::Other,
};
