use crate::errors::TrailheadError;
use derive_more::Display;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

/// Flavour of generated place names
#[derive(Debug, Display, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameTheme {
    #[display("earth")]
    Earth,
    #[default]
    #[display("futuristic")]
    Futuristic,
}

impl FromStr for NameTheme {
    type Err = TrailheadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "earth" => Ok(NameTheme::Earth),
            "futuristic" => Ok(NameTheme::Futuristic),
            other => Err(TrailheadError::InvalidArgument {
                reason: format!("Unknown name theme '{other}', expected earth or futuristic"),
            }),
        }
    }
}

const FUTURISTIC_LAKES: &[&str] = &[
    "Nebula Lake", "Starlake", "Quantum Pool", "Aurora Basin", "Galactic Lagoon",
    "Nova Reservoir", "Celestial Mere", "Photon Pond", "Gravity Bay", "Cosmic Tarn",
    "Astro Loch", "Plasma Pool", "Pulsar Pool", "Void Waters", "Neutron Nook",
    "Fusion Fjord", "Meteor Mere", "Solar Sea", "Lunar Lake", "Mars Marsh",
    "Jupiter Jetty", "Saturn Sound", "Neptune Narrows", "Pluto Pond", "Orion Ocean",
    "Sirius Sea", "Polaris Pool", "Cassiopeia Cove", "Lyra Lagoon", "Cygnus Sound",
    "Pegasus Pool", "Draco Delta", "Hydra Harbor", "Gemini Gulf",
];

const EARTH_LAKES: &[&str] = &[
    "Crystal Lake", "Mirror Lake", "Emerald Lake", "Sapphire Lake", "Alpine Lake",
    "Clear Lake", "Blue Lake", "Hidden Lake", "Tranquil Lake", "Serene Lake",
    "Bear Lake", "Deer Lake", "Fish Lake", "Golden Lake", "Silver Lake",
    "Jade Lake", "Pearl Lake", "Ruby Lake", "Amethyst Lake", "Topaz Lake",
    "Sunset Lake", "Dawn Lake", "Twilight Lake", "Rainbow Lake", "Storm Lake",
    "Calm Lake", "Deep Lake", "Long Lake", "Round Lake", "Narrow Lake",
];

const FUTURISTIC_PEAKS: &[&str] = &[
    "Nebula Peak", "Starlight Spire", "Quantum Summit", "Aurora Pinnacle", "Galactic Crest",
    "Nova Point", "Celestial Apex", "Photon Ridge", "Gravity Bluff", "Cosmic Spire",
    "Astro Horn", "Plasma Heights", "Pulsar Peak", "Neutron Needle", "Fusion Face",
    "Meteor Mesa", "Solar Summit", "Lunar Ledge", "Venus Vista", "Saturn Spire",
    "Uranus Uplands", "Andromeda Apex", "Orion Overlook", "Vega Vista", "Polaris Peak",
    "Lyra Ledge", "Aquila Apex", "Draco Dome", "Hydra Heights", "Taurus Tower",
];

const EARTH_PEAKS: &[&str] = &[
    "Summit Peak", "Eagle Peak", "Thunder Peak", "Granite Peak", "Alpine Peak",
    "High Point", "Vista Peak", "Rocky Peak", "Snow Peak", "Cloud Peak",
    "Elk Peak", "Moose Peak", "Wolf Peak", "Coyote Peak", "Fox Peak",
    "Lynx Peak", "Copper Peak", "Iron Peak", "Onyx Peak", "Garnet Peak",
    "Opal Peak", "Ivory Peak", "Midnight Peak", "Morning Peak", "Dusk Peak",
    "Lightning Peak", "Rough Peak", "Windy Peak", "Lookout Peak", "Sentinel Peak",
];

const FUTURISTIC_SETTLEMENTS: &[&str] = &[
    "Orbital Outpost", "Starfall Camp", "Comet Hollow", "Ion Station", "Zenith Base",
    "Eclipse Camp", "Horizon Dock", "Beacon Point", "Relay Ridge", "Halo Haven",
    "Vector Camp", "Prism Flats", "Quasar Landing", "Apogee Camp", "Radiant Rest",
    "Parallax Post",
];

const EARTH_SETTLEMENTS: &[&str] = &[
    "Eagle's Nest", "Bear Creek", "Mountain View", "Pine Ridge", "Sunset Camp",
    "Wildflower Meadow", "Rocky Point", "Hidden Valley", "Thunder Ridge", "Misty Falls",
    "Golden Hollow", "Emerald Basin", "Silver Creek", "Alpine Meadow", "Cedar Grove",
    "Aspen Flats",
];

pub fn lake_names(theme: NameTheme) -> &'static [&'static str] {
    match theme {
        NameTheme::Earth => EARTH_LAKES,
        NameTheme::Futuristic => FUTURISTIC_LAKES,
    }
}

pub fn peak_names(theme: NameTheme) -> &'static [&'static str] {
    match theme {
        NameTheme::Earth => EARTH_PEAKS,
        NameTheme::Futuristic => FUTURISTIC_PEAKS,
    }
}

pub fn settlement_names(theme: NameTheme) -> &'static [&'static str] {
    match theme {
        NameTheme::Earth => EARTH_SETTLEMENTS,
        NameTheme::Futuristic => FUTURISTIC_SETTLEMENTS,
    }
}

/// Hands out unique names: random picks from a fixed list without
/// replacement, then `"{prefix} {n}"` once the list runs dry.
#[derive(Debug, Clone)]
pub struct NamePool {
    names: &'static [&'static str],
    fallback_prefix: &'static str,
    used: HashSet<String>,
}

impl NamePool {
    pub fn new(names: &'static [&'static str], fallback_prefix: &'static str) -> Self {
        Self {
            names,
            fallback_prefix,
            used: HashSet::new(),
        }
    }

    pub fn lakes(theme: NameTheme) -> Self {
        Self::new(lake_names(theme), "Lake")
    }

    pub fn peaks(theme: NameTheme) -> Self {
        Self::new(peak_names(theme), "Peak")
    }

    pub fn settlements(theme: NameTheme) -> Self {
        Self::new(settlement_names(theme), "Camp")
    }

    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> String {
        let available: Vec<&str> = self
            .names
            .iter()
            .copied()
            .filter(|name| !self.used.contains(*name))
            .collect();

        let name = if available.is_empty() {
            let mut n = self.used.len() + 1;
            let mut candidate = format!("{} {n}", self.fallback_prefix);
            while self.used.contains(&candidate) {
                n += 1;
                candidate = format!("{} {n}", self.fallback_prefix);
            }
            candidate
        } else {
            available[rng.gen_range(0..available.len())].to_string()
        };

        self.used.insert(name.clone());
        name
    }

    pub fn used(&self) -> usize {
        self.used.len()
    }
}
