//! Material path construction.

use tilekit_grid::Ruggedness;
use tilekit_rules::OverlaySettings;

/// Directory label-specific materials live under.
pub const DEFAULT_MATERIAL_ROOT: &str = "WorldMaterials/Tilekit";

/// Path of the hill sprite for a cell, or `None` for flat cells.
///
/// Every hill class can take the extra-snowy variant; mountains and
/// impassable terrain can also be snowy or semi-snowy. At most one suffix is
/// applied, coldest first.
pub fn hill_path(
    root: &str,
    label: &str,
    ruggedness: Ruggedness,
    temperature: f32,
    settings: &OverlaySettings,
) -> Option<String> {
    let (name, mountainous) = match ruggedness {
        Ruggedness::Flat => return None,
        Ruggedness::SmallHills => ("SmallHills", false),
        Ruggedness::LargeHills => ("LargeHills", false),
        Ruggedness::Mountainous => ("Mountains", true),
        Ruggedness::Impassable => ("Impassable", true),
    };

    let suffix = if temperature < settings.hill_extra_snowy_below {
        "_ExtraSnowy"
    } else if mountainous && temperature < settings.hill_snowy_below {
        "_Snowy"
    } else if mountainous && temperature < settings.hill_semi_snowy_below {
        "_SemiSnowy"
    } else {
        ""
    };

    Some(format!("{root}/{label}/Hills/{name}{suffix}"))
}

/// Path of the forest sprite for a cell.
///
/// Variants combine a snowy part (cold) with a sparse or dense part (dry or
/// wet), e.g. `Forest_SnowyDense`. Without either part the path is plain
/// `Forest`.
pub fn forest_path(
    root: &str,
    label: &str,
    temperature: f32,
    rainfall: f32,
    settings: &OverlaySettings,
) -> String {
    let mut variant = String::new();
    if temperature < settings.forest_snowy_below {
        variant.push_str("Snowy");
    }
    if rainfall < settings.forest_sparse_below {
        variant.push_str("Sparse");
    } else if rainfall > settings.forest_dense_above {
        variant.push_str("Dense");
    }

    if variant.is_empty() {
        format!("{root}/{label}/Forest/Forest")
    } else {
        format!("{root}/{label}/Forest/Forest_{variant}")
    }
}
