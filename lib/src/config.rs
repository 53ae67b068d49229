//! The configuration.

use crate::{
    automaton::Automaton,
    error::Error,
    index::Index,
    render::Palette,
    rules::{Life, Rule},
    world::World,
};
use educe::Educe;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The configuration of an automaton.
///
/// Every knob is typed; there is no free-form option bag. Unknown
/// rule or color names are rejected when the automaton is built, not
/// silently defaulted.
#[derive(Clone, Debug, PartialEq, Eq, Educe)]
#[educe(Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct Config {
    /// Number of horizontal cells.
    #[educe(Default = 50)]
    pub width: i32,

    /// Number of vertical cells.
    #[educe(Default = 50)]
    pub height: i32,

    /// The cell size in pixels.
    #[educe(Default = 10)]
    pub cell_size: u32,

    /// Delay between generations in milliseconds.
    ///
    /// Zero means "as fast as the clock allows".
    #[educe(Default = 100)]
    pub delay_ms: u64,

    /// The transition rule, in B/S notation.
    ///
    /// An empty string keeps the default Conway rule.
    #[educe(Default(expression = "String::from(\"B3/S23\")"))]
    pub rule_string: String,

    /// The name of the color the living cells are drawn in.
    ///
    /// One of [`Palette::names`].
    #[educe(Default(expression = "String::from(\"black\")"))]
    pub color: String,

    /// Whether a resize re-seeds the live cells that still fit.
    #[educe(Default = true)]
    pub recover: bool,
}

impl Config {
    /// Sets the board extents.
    pub fn set_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the cell size in pixels.
    pub fn set_cell_size(mut self, cell_size: u32) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Sets the delay between generations.
    pub fn set_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Sets the transition rule, in B/S notation.
    pub fn set_rule_string(mut self, rule_string: impl Into<String>) -> Self {
        self.rule_string = rule_string.into();
        self
    }

    /// Sets the color of the living cells by catalog name.
    pub fn set_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Sets whether a resize re-seeds the surviving cells.
    pub fn set_recover(mut self, recover: bool) -> Self {
        self.recover = recover;
        self
    }

    /// The delay between generations.
    pub const fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Checks the configuration for consistency.
    pub fn validate(&self) -> Result<(), Error> {
        if self.cell_size == 0 {
            return Err(Error::NonPositive);
        }
        self.rule()?;
        Ok(())
    }

    /// Builds the configured rule.
    pub fn rule(&self) -> Result<Box<dyn Rule>, Error> {
        let life = if self.rule_string.is_empty() {
            Life::conway()
        } else {
            self.rule_string.parse::<Life>()?
        };
        let palette = Palette::from_name(&self.color, self.width, self.height)?;
        Ok(Box::new(life.with_palette(palette)))
    }

    /// Builds a dense automaton from this configuration.
    pub fn automaton(self) -> Result<Automaton<World>, Error> {
        Automaton::new(self)
    }

    /// Builds a sparse automaton from this configuration.
    pub fn automaton_sparse(self) -> Result<Automaton<Index>, Error> {
        Automaton::new_sparse(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert_eq!(config.width, 50);
        assert_eq!(config.cell_size, 10);
        assert_eq!(config.rule_string, "B3/S23");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_cell_size_is_rejected() {
        let config = Config::default().set_cell_size(0);
        assert_eq!(config.validate(), Err(Error::NonPositive));
    }

    #[test]
    fn bad_rule_string_is_rejected() {
        let config = Config::default().set_rule_string("B9/S");
        assert!(config.validate().is_err());
    }

    #[test]
    fn bad_color_name_is_rejected() {
        let config = Config::default().set_color("mauve");
        assert_eq!(
            config.validate(),
            Err(Error::UnknownColor(String::from("mauve")))
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn config_serde_round_trip() {
        let config = Config::default().set_size(30, 20).set_rule_string("B36/S23");
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
