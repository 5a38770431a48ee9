//! Trait registry — which commands each capability supports.
//!
//! The table is static: identical (trait set, command) inputs always produce
//! the same answer, and nothing here has side effects.

use std::collections::BTreeSet;

use homegraph_domain::command::Command;
use homegraph_domain::traits::Trait;

/// The commands a single trait supports.
#[must_use]
pub fn commands_for(capability: Trait) -> &'static [Command] {
    match capability {
        Trait::OnOff => &[Command::On, Command::Off, Command::ToggleOnOff],
        Trait::OpenClose => &[Command::Open, Command::Close, Command::OpenPercentAbsolute],
        Trait::StartStop | Trait::TransportControl => &[
            Command::Start,
            Command::Stop,
            Command::Pause,
            Command::Unpause,
        ],
        Trait::InputSelector => &[Command::SetInput],
        Trait::Brightness => &[Command::SetBrightness],
        Trait::FanSpeed => &[Command::SetFanSpeed],
        Trait::TemperatureSetting => &[
            Command::SetTemperature,
            Command::SetTemperatureCelsius,
            Command::SetTemperatureFahrenheit,
            Command::ChangeRelativeTemperature,
        ],
        Trait::Toggles => &[Command::ToggleSetting],
        Trait::Locator => &[Command::FindDevice, Command::SilenceRinging],
        Trait::Broadcast => &[Command::Broadcast],
        Trait::LightEffects => &[
            Command::SetLightEffect,
            Command::SetLightEffectWithDuration,
        ],
        Trait::Volume => &[
            Command::VolumeUp,
            Command::VolumeDown,
            Command::SetVolumeLevel,
            Command::Mute,
            Command::Unmute,
        ],
        Trait::Modes => &[Command::SetMode],
        Trait::LockUnlock => &[Command::Lock, Command::Unlock],
        Trait::Dock => &[Command::Dock],
    }
}

/// Whether any trait in the set supports the command.
#[must_use]
pub fn supports(traits: &BTreeSet<Trait>, command: Command) -> bool {
    traits
        .iter()
        .any(|capability| commands_for(*capability).contains(&command))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(traits: &[Trait]) -> BTreeSet<Trait> {
        traits.iter().copied().collect()
    }

    #[test]
    fn should_support_on_off_commands_for_on_off_trait() {
        let traits = set(&[Trait::OnOff]);
        assert!(supports(&traits, Command::On));
        assert!(supports(&traits, Command::Off));
        assert!(supports(&traits, Command::ToggleOnOff));
    }

    #[test]
    fn should_not_support_commands_outside_trait_set() {
        let traits = set(&[Trait::OnOff]);
        assert!(!supports(&traits, Command::SetBrightness));
        assert!(!supports(&traits, Command::Lock));
    }

    #[test]
    fn should_support_union_of_multiple_traits() {
        let traits = set(&[Trait::OnOff, Trait::Brightness, Trait::Volume]);
        assert!(supports(&traits, Command::SetBrightness));
        assert!(supports(&traits, Command::Mute));
        assert!(!supports(&traits, Command::SetTemperature));
    }

    #[test]
    fn should_share_transport_commands_between_start_stop_and_transport_control() {
        assert!(supports(&set(&[Trait::StartStop]), Command::Pause));
        assert!(supports(&set(&[Trait::TransportControl]), Command::Stop));
    }

    #[test]
    fn should_not_support_anything_with_empty_trait_set() {
        let traits = BTreeSet::new();
        assert!(!supports(&traits, Command::On));
    }

    #[test]
    fn should_give_same_answer_on_repeated_queries() {
        let traits = set(&[Trait::TemperatureSetting]);
        for _ in 0..3 {
            assert!(supports(&traits, Command::ChangeRelativeTemperature));
            assert!(!supports(&traits, Command::Broadcast));
        }
    }
}
