//! Deployment settings for the hole placement command.
//!
//! Every name the command matches against the host model (document title
//! marker, family name, parameter names) depends on the locale of the
//! project templates, so none of them is hardcoded in the operations.

use crate::model::Category;

/// What to do with a duct or pipe whose path is not a straight segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NonLinearPolicy {
    /// Log a warning and leave the element without openings.
    #[default]
    Skip,
    /// Abort the whole command before any transaction opens.
    Fail,
}

/// Settings for one run of [`AddHoles`](crate::operations::AddHoles).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoleConfig {
    /// Substring identifying the linked ventilation/plumbing document.
    pub link_title_marker: String,
    /// Category of the opening family.
    pub template_category: Category,
    /// Family name of the opening to place.
    pub family_name: String,
    /// Instance parameter receiving the opening width.
    pub width_parameter: String,
    /// Instance parameter receiving the opening height.
    pub height_parameter: String,
    /// Name of the transaction wrapping all placements.
    pub transaction_name: String,
    /// Title of the message shown when the command cannot complete.
    pub error_title: String,
    pub non_linear: NonLinearPolicy,
    /// Also cut walls of linked architectural documents.
    pub include_linked_walls: bool,
}

impl Default for HoleConfig {
    /// Russian-locale project templates.
    fn default() -> Self {
        Self {
            link_title_marker: "ОВ".to_owned(),
            template_category: Category::GenericModel,
            family_name: "Отверстие".to_owned(),
            width_parameter: "Ширина".to_owned(),
            height_parameter: "Высота".to_owned(),
            transaction_name: "Расстановка отверстий".to_owned(),
            error_title: "Ошибка".to_owned(),
            non_linear: NonLinearPolicy::Skip,
            include_linked_walls: true,
        }
    }
}

impl HoleConfig {
    /// English-locale project templates.
    #[must_use]
    pub fn english() -> Self {
        Self {
            link_title_marker: "MEP".to_owned(),
            family_name: "Opening".to_owned(),
            width_parameter: "Width".to_owned(),
            height_parameter: "Height".to_owned(),
            transaction_name: "Place openings".to_owned(),
            error_title: "Error".to_owned(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_link_title_marker(mut self, marker: impl Into<String>) -> Self {
        self.link_title_marker = marker.into();
        self
    }

    #[must_use]
    pub fn with_family(mut self, category: Category, family_name: impl Into<String>) -> Self {
        self.template_category = category;
        self.family_name = family_name.into();
        self
    }

    #[must_use]
    pub fn with_size_parameters(
        mut self,
        width: impl Into<String>,
        height: impl Into<String>,
    ) -> Self {
        self.width_parameter = width.into();
        self.height_parameter = height.into();
        self
    }

    #[must_use]
    pub fn with_transaction_name(mut self, name: impl Into<String>) -> Self {
        self.transaction_name = name.into();
        self
    }

    #[must_use]
    pub fn with_non_linear(mut self, policy: NonLinearPolicy) -> Self {
        self.non_linear = policy;
        self
    }

    #[must_use]
    pub fn with_linked_walls(mut self, include: bool) -> Self {
        self.include_linked_walls = include;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_preset_keeps_policies() {
        let config = HoleConfig::english();
        assert_eq!(config.family_name, "Opening");
        assert_eq!(config.template_category, Category::GenericModel);
        assert_eq!(config.non_linear, NonLinearPolicy::Skip);
        assert!(config.include_linked_walls);
    }

    #[test]
    fn builder_overrides_fields() {
        let config = HoleConfig::default()
            .with_link_title_marker("HVAC")
            .with_size_parameters("W", "H")
            .with_non_linear(NonLinearPolicy::Fail)
            .with_linked_walls(false);
        assert_eq!(config.link_title_marker, "HVAC");
        assert_eq!(config.width_parameter, "W");
        assert_eq!(config.height_parameter, "H");
        assert_eq!(config.non_linear, NonLinearPolicy::Fail);
        assert!(!config.include_linked_walls);
        assert_eq!(config.family_name, "Отверстие");
    }
}
