// Narration request state machine.
//
// At most one narration is ever non-idle. Each `begin` bumps an epoch and
// returns a ticket; completions carrying a superseded ticket are inert, so
// late async results from a cancelled or replaced request can never start
// or stop playback out of turn. The platform side owns the actual audio
// and speech handles — this module only arbitrates who is current.

/// Lifecycle of the single in-flight narration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NarrationStatus {
    #[default]
    Idle,
    Pending,
    Playing,
    Failed,
}

/// Proof of which request an async completion belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NarrationTicket {
    epoch: u64,
}

#[derive(Debug, Default)]
pub struct NarrationMachine {
    status: NarrationStatus,
    epoch: u64,
    hotspot_id: Option<String>,
}

impl NarrationMachine {
    #[inline]
    pub fn status(&self) -> NarrationStatus {
        self.status
    }

    /// Id of the hotspot the current (or last failed) request is for.
    #[inline]
    pub fn hotspot_id(&self) -> Option<&str> {
        self.hotspot_id.as_deref()
    }

    #[inline]
    pub fn is_current(&self, ticket: NarrationTicket) -> bool {
        ticket.epoch == self.epoch
    }

    /// Start a new request, superseding any prior one. The caller must stop
    /// audible output from the prior request before issuing new output.
    pub fn begin(&mut self, hotspot_id: &str) -> NarrationTicket {
        self.epoch += 1;
        self.status = NarrationStatus::Pending;
        self.hotspot_id = Some(hotspot_id.to_owned());
        NarrationTicket { epoch: self.epoch }
    }

    /// Service audio or the speech fallback began producing output.
    /// Returns false (and changes nothing) for superseded tickets.
    pub fn playback_started(&mut self, ticket: NarrationTicket) -> bool {
        if !self.is_current(ticket) || self.status != NarrationStatus::Pending {
            return false;
        }
        self.status = NarrationStatus::Playing;
        true
    }

    /// Playback ran to its natural end.
    pub fn completed(&mut self, ticket: NarrationTicket) -> bool {
        if !self.is_current(ticket) || self.status != NarrationStatus::Playing {
            return false;
        }
        self.status = NarrationStatus::Idle;
        self.hotspot_id = None;
        true
    }

    /// Neither the service audio nor the fallback could start.
    pub fn failed(&mut self, ticket: NarrationTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.status = NarrationStatus::Failed;
        true
    }

    /// Stop everything and return to idle. Bumps the epoch so in-flight
    /// completions of the cancelled request go stale.
    pub fn cancel(&mut self) {
        self.epoch += 1;
        self.status = NarrationStatus::Idle;
        self.hotspot_id = None;
    }
}
