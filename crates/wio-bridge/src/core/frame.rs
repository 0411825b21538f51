/// The guest's entry points as seen by the frame loop.
pub trait Guest {
    /// Run the guest's start routine. Called exactly once.
    fn start(&mut self);

    /// Run one frame. Returns `false` once the guest wants to stop.
    fn frame(&mut self) -> bool;
}

/// The host's display-refresh scheduling primitive.
pub trait FrameScheduler {
    /// Arrange for the next frame callback. One request, one callback.
    fn request_frame(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    /// A frame callback is pending.
    Scheduled,
    /// The guest asked to stop. Terminal.
    Stopped,
}

/// Drives the guest once per display refresh until it reports stop.
#[derive(Debug)]
pub struct FrameDriver {
    state: FrameState,
    frames: u64,
}

impl FrameDriver {
    /// Invoke the guest's start entry point, then schedule the first frame.
    pub fn start<G, S>(guest: &mut G, scheduler: &mut S) -> Self
    where
        G: Guest + ?Sized,
        S: FrameScheduler + ?Sized,
    {
        guest.start();
        scheduler.request_frame();
        Self {
            state: FrameState::Scheduled,
            frames: 0,
        }
    }

    /// Handle one frame callback. Once stopped, callbacks are ignored.
    pub fn on_frame<G, S>(&mut self, guest: &mut G, scheduler: &mut S) -> FrameState
    where
        G: Guest + ?Sized,
        S: FrameScheduler + ?Sized,
    {
        if self.state == FrameState::Stopped {
            return self.state;
        }
        self.frames += 1;
        if guest.frame() {
            scheduler.request_frame();
        } else {
            log::info!("guest stopped after {} frames", self.frames);
            self.state = FrameState::Stopped;
        }
        self.state
    }

    pub fn state(&self) -> FrameState {
        self.state
    }

    /// Number of frame entry point invocations so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
