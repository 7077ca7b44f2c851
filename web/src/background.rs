use serde::{Deserialize, Serialize};

use crate::utils::*;

/// Backdrop the player picks on the welcome screen, applied as a class on
/// `<body>` and persisted across visits.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) enum Background {
    Default,
    Nebula,
    Forest,
    Sunset,
}

impl Background {
    pub(crate) const ALL: [Background; 4] =
        [Self::Default, Self::Nebula, Self::Forest, Self::Sunset];

    pub(crate) const fn label(self) -> &'static str {
        use Background::*;
        match self {
            Default => "Classic",
            Nebula => "Galaxy",
            Forest => "Abyss",
            Sunset => "Cyan",
        }
    }

    pub(crate) const fn body_class(self) -> &'static str {
        use Background::*;
        match self {
            Default => "body-bg-default",
            Nebula => "body-bg-nebula",
            Forest => "body-bg-forest",
            Sunset => "body-bg-sunset",
        }
    }

    fn update_body(background: Self) {
        let class = background.body_class();
        log::debug!("background: {}", class);
        gloo::utils::body().set_class_name(class);
    }

    pub(crate) fn init() {
        Self::update_body(LocalOrDefault::local_or_default());
    }

    pub(crate) fn apply(background: Self) {
        background.local_save();
        Self::update_body(background);
    }
}

impl Default for Background {
    fn default() -> Self {
        Self::Default
    }
}

impl StorageKey for Background {
    const KEY: &'static str = "memorito:background";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_background_maps_to_a_distinct_body_class() {
        let mut classes: Vec<_> = Background::ALL.iter().map(|b| b.body_class()).collect();
        classes.sort_unstable();
        classes.dedup();
        assert_eq!(classes.len(), Background::ALL.len());
        assert!(classes.iter().all(|c| c.starts_with("body-bg-")));
    }

    #[test]
    fn missing_preference_falls_back_to_the_default_backdrop() {
        assert_eq!(Background::default(), Background::Default);
        assert_eq!(Background::default().body_class(), "body-bg-default");
    }
}
