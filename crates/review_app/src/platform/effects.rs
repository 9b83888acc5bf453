use review_bridge::{HostSink, OutboundMessage};
use review_core::Effect;
use review_logging::{review_info, review_warn};

/// Forwards core effects to the engine or host store through a [`HostSink`].
pub struct EffectRunner {
    sink: Box<dyn HostSink>,
}

impl EffectRunner {
    pub fn new(sink: Box<dyn HostSink>) -> Self {
        Self { sink }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            let message = OutboundMessage::from(&effect);
            match &effect {
                Effect::Execute { mode } => review_info!("Execute mode={}", mode),
                Effect::Edit { bookmark_id, mode, .. } => {
                    review_info!("Edit bookmark_id={} mode={}", bookmark_id, mode.as_str())
                }
                Effect::Remove { bookmark_id } => review_info!("Remove bookmark_id={}", bookmark_id),
                Effect::RepairRedirect {
                    bookmark_id,
                    new_url,
                } => review_info!(
                    "RepairRedirect bookmark_id={} new_url={}",
                    bookmark_id,
                    new_url
                ),
            }
            // The view already reflects the change; a failed delivery is only logged.
            if let Err(err) = self.sink.deliver(&message) {
                review_warn!("Failed to deliver {:?}: {}", message, err);
            }
        }
    }
}
