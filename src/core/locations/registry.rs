//! Canonical location enumeration.
//!
//! The order of [`ALL_LOCATIONS`] is display order only; filtering never
//! depends on it.

/// Reserved value standing for "the item declared no location of its own".
///
/// Never equal to any entry of [`ALL_LOCATIONS`].
pub const UNSPECIFIED_LOCATION: &str = "__unspecified__";

/// Every valid location name, in the order the filter presents them.
pub const ALL_LOCATIONS: [&str; 29] = [
    "Abyss",
    "Moss Grotto",
    "The Marrow",
    "Deep Docks",
    "Far Fields",
    "Wormways",
    "Hunter's March",
    "Greymoor",
    "Bellhart",
    "Shellwood",
    "Blasted Steps",
    "Sinner's Road",
    "Mount Fay",
    "Sands of Karak",
    "Bilewater",
    "Grand Gate",
    "Choral Chambers",
    "Whispering Vaults",
    "Whiteward",
    "High Halls",
    "Memorium",
    "Cradle",
    "Underworks",
    "Putrified Ducts",
    "Verdania",
    "Cogwork Core",
    "Slab",
    "Weavenest Atla",
    "Wisp Thicket",
];

/// Exact, case-sensitive membership check. No trimming is done here.
pub fn is_valid_location(s: &str) -> bool {
    ALL_LOCATIONS.contains(&s)
}

/// Valid location or the unspecified marker, i.e. anything a stored
/// selection may legitimately contain.
pub fn is_selectable(s: &str) -> bool {
    s == UNSPECIFIED_LOCATION || is_valid_location(s)
}
