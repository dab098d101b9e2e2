/// Named map centre in WGS84 degrees
pub struct MapCenter {
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
}

pub const MAP_CENTERS: &[MapCenter] = &[
    MapCenter {
        name: "kaBaum",
        lat: 49.009599,
        lon: 8.403940,
    },
    MapCenter {
        name: "kaBaum1",
        lat: 49.011_335_993_911_76,
        lon: 8.410_817_826_355_105,
    },
    MapCenter {
        name: "kaMarkt",
        lat: 49.009229,
        lon: 8.403903,
    },
    MapCenter {
        name: "kaKunst",
        lat: 49.011025,
        lon: 8.399885,
    },
    MapCenter {
        name: "kaZoo",
        lat: 48.99672,
        lon: 8.40214,
    },
];

/// Location used when the configuration names none
pub const DEFAULT_LOCATION: &str = "kaBaum";

pub fn find_map_center(name: &str) -> Option<&'static MapCenter> {
    MAP_CENTERS.iter().find(|c| c.name == name)
}
