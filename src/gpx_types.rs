/// Survey group derived from a waypoint's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    Transect1,
    Transect2,
    Transect3,
    Unassigned,
}

impl Group {
    /// All groups, in drawing and legend order.
    pub const ALL: [Group; 4] = [
        Group::Transect1,
        Group::Transect2,
        Group::Transect3,
        Group::Unassigned,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Group::Transect1 => "Transect 1",
            Group::Transect2 => "Transect 2",
            Group::Transect3 => "Transect 3",
            Group::Unassigned => "Unassigned",
        }
    }
}

/// A single GPX waypoint (<wpt>).
#[derive(Debug, Clone)]
pub struct Waypoint {
    pub lat: f64,
    pub lon: f64,
    pub ele: Option<f64>,
    pub time: Option<String>,
    pub name: Option<String>,
    pub desc: Option<String>,
    pub group: Group,
}

impl Waypoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            ele: None,
            time: None,
            name: None,
            desc: None,
            group: Group::Unassigned,
        }
    }
}
