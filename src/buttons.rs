//! The four game buttons, sampled as one pressed-mask.
//!
//! D-pad left, up and right play red, yellow and green; Start starts a round.
//! All four are active low with the internal pull-up enabled.

use esp_hal::gpio::{
    Input,
    InputConfig,
    Pull,
};

use crate::{
    ButtonResources,
    channels::CHANNEL_COUNT,
};

/// Game buttons, indexed by channel.
pub struct Buttons {
    inputs: [Input<'static>; CHANNEL_COUNT],
}

impl From<ButtonResources<'static>> for Buttons {
    fn from(res: ButtonResources<'static>) -> Self {
        let pull_up = InputConfig::default().with_pull(Pull::Up);
        // Same order as the channel numbers.
        Self {
            inputs: [
                Input::new(res.left, pull_up),
                Input::new(res.up, pull_up),
                Input::new(res.right, pull_up),
                Input::new(res.start, pull_up),
            ],
        }
    }
}

impl Buttons {
    /// Raw levels of every channel: bit `n` is set while channel `n` is held.
    ///
    /// No filtering happens here; feed the result to a
    /// [`Debouncer`](crate::Debouncer) at a fixed rate.
    pub fn sample(&self) -> u8 {
        self.inputs
            .iter()
            .enumerate()
            .fold(0, |mask, (channel, input)| {
                if input.is_low() {
                    mask | (1 << channel)
                } else {
                    mask
                }
            })
    }
}
