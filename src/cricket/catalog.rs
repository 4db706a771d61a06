//! Known franchises and host venues accepted by the predictor.
//!
//! The model was fitted on these exact names, so inputs are matched
//! case-insensitively but always handed on in their canonical spelling.

use serde::Serialize;

pub const TEAMS: [&str; 8] = [
    "Sunrisers Hyderabad",
    "Mumbai Indians",
    "Royal Challengers Bangalore",
    "Kolkata Knight Riders",
    "Kings XI Punjab",
    "Chennai Super Kings",
    "Rajasthan Royals",
    "Delhi Capitals",
];

pub const CITIES: [&str; 29] = [
    "Hyderabad",
    "Bangalore",
    "Mumbai",
    "Indore",
    "Kolkata",
    "Delhi",
    "Chandigarh",
    "Jaipur",
    "Chennai",
    "Cape Town",
    "Port Elizabeth",
    "Durban",
    "Centurion",
    "East London",
    "Johannesburg",
    "Kimberley",
    "Bloemfontein",
    "Ahmedabad",
    "Cuttack",
    "Nagpur",
    "Dharamsala",
    "Visakhapatnam",
    "Pune",
    "Raipur",
    "Ranchi",
    "Abu Dhabi",
    "Sharjah",
    "Mohali",
    "Bengaluru",
];

/// Primary kit colour per team, for the dashboard.
pub fn team_color(team: &str) -> Option<&'static str> {
    let color = match canonical_team(team)? {
        "Sunrisers Hyderabad" => "#ff822a",
        "Mumbai Indians" => "#004c91",
        "Royal Challengers Bangalore" => "#d41948",
        "Kolkata Knight Riders" => "#3a225d",
        "Kings XI Punjab" => "#dd1f2d",
        "Chennai Super Kings" => "#fdb913",
        "Rajasthan Royals" => "#254aa5",
        "Delhi Capitals" => "#17479e",
        _ => return None,
    };
    Some(color)
}

pub fn canonical_team(name: &str) -> Option<&'static str> {
    lookup(&TEAMS, name)
}

pub fn canonical_city(name: &str) -> Option<&'static str> {
    lookup(&CITIES, name)
}

fn lookup(set: &[&'static str], name: &str) -> Option<&'static str> {
    let name = name.trim();
    set.iter().copied().find(|c| c.eq_ignore_ascii_case(name))
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamEntry {
    pub name: &'static str,
    pub color: &'static str,
}

/// Catalog listing, sorted alphabetically the way the selection boxes show it.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    pub teams: Vec<TeamEntry>,
    pub cities: Vec<&'static str>,
}

pub fn catalog() -> Catalog {
    let mut teams: Vec<TeamEntry> = TEAMS
        .iter()
        .filter_map(|&name| team_color(name).map(|color| TeamEntry { name, color }))
        .collect();
    teams.sort_by_key(|t| t.name);

    let mut cities = CITIES.to_vec();
    cities.sort_unstable();

    Catalog { teams, cities }
}
