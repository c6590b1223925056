//! Unique ownership of one suspended producer.
//!
//! A [`FrameHandle`] owns a producer [`Body`] together with its
//! [`ProducerState`]. It is the only thing that can resume the producer, and
//! dropping or [resetting](FrameHandle::reset) it releases the producer and
//! any value it left in the slot without running more producer code.

use std::{fmt, mem, rc::Rc};

use tracing::{debug, trace};

use crate::{
    body::Body,
    error::{GeneratorError, Result},
    state::ProducerState,
    step::Step,
};

/// Identity of a frame.
///
/// Two handles have the same id iff they own the same frame. All empty handles
/// share [`FrameId::EMPTY`]. The id does not change when the handle is moved.
///
/// An id is only meaningful while its frame is alive. Once the frame is
/// dropped, a newly created frame may reuse the same id.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(usize);

impl FrameId {
    pub const EMPTY: FrameId = FrameId(0);

    fn of<T>(state: &Rc<ProducerState<T>>) -> Self {
        FrameId(Rc::as_ptr(state) as *const () as usize)
    }

    /// Returns `true` for the identity shared by all empty handles.
    pub fn is_empty(self) -> bool {
        self == Self::EMPTY
    }
}

impl fmt::Debug for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("FrameId(empty)")
        } else {
            write!(f, "FrameId({:#x})", self.0)
        }
    }
}

struct Frame<'a, T> {
    state: Rc<ProducerState<T>>,
    body: Box<dyn Body<T> + 'a>,
}

/// Marks the state failed if the producer unwinds out of `resume`.
struct FailOnUnwind<'s, T>(&'s ProducerState<T>);

impl<T> FailOnUnwind<'_, T> {
    fn disarm(self) {
        mem::forget(self);
    }
}

impl<T> Drop for FailOnUnwind<'_, T> {
    fn drop(&mut self) {
        self.0.fail();
    }
}

/// Move-only owner of one frame.
pub struct FrameHandle<'a, T> {
    frame: Option<Frame<'a, T>>,
}

impl<'a, T> FrameHandle<'a, T> {
    /// A handle that owns nothing.
    pub const fn empty() -> Self {
        Self { frame: None }
    }

    /// Take ownership of a not-yet-started body.
    pub fn new<B>(body: B) -> Self
    where
        B: Body<T> + 'a,
    {
        let frame = Frame {
            state: Rc::new(ProducerState::new()),
            body: Box::new(body),
        };
        trace!(frame = ?FrameId::of(&frame.state), "frame created");
        Self { frame: Some(frame) }
    }

    /// Returns `true` if the handle owns no frame.
    pub fn is_empty(&self) -> bool {
        self.frame.is_none()
    }

    /// Identity of the owned frame, [`FrameId::EMPTY`] if there is none.
    pub fn id(&self) -> FrameId {
        self.frame
            .as_ref()
            .map_or(FrameId::EMPTY, |frame| FrameId::of(&frame.state))
    }

    /// Returns `true` once the producer finished or failed.
    ///
    /// An empty handle is not done; it simply has nothing to resume.
    pub fn done(&self) -> bool {
        self.frame
            .as_ref()
            .is_some_and(|frame| frame.state.is_done())
    }

    /// Read access to the frame's state, `None` for an empty handle.
    ///
    /// Only the frame itself can finish a producer:
    ///
    /// ```compile_fail
    /// use lazyseq::{FrameHandle, build::once};
    ///
    /// let handle = FrameHandle::new(once(1));
    /// handle.state().unwrap().finalize();
    /// ```
    pub fn state(&self) -> Option<&ProducerState<T>> {
        self.frame.as_ref().map(|frame| &*frame.state)
    }

    /// Run the producer until its next yield or its completion.
    ///
    /// The value left by the previous yield is dropped before the producer
    /// runs. `Step::Yielded(())` means a new value is available through
    /// [`state`](Self::state); `Step::Complete(())` means the producer
    /// returned and the frame is done.
    ///
    /// # Errors
    ///
    /// [`GeneratorError::InvalidResume`] if the handle is empty or done, and
    /// whatever protocol error the body reports, which also marks the frame
    /// failed.
    ///
    /// # Panics
    ///
    /// A panic in producer logic propagates out of this call. The frame is
    /// marked failed and holds no value afterwards.
    pub fn resume(&mut self) -> Result<Step<(), ()>> {
        let Some(frame) = self.frame.as_mut() else {
            return Err(GeneratorError::InvalidResume);
        };
        if frame.state.is_done() {
            return Err(GeneratorError::InvalidResume);
        }

        let id = FrameId::of(&frame.state);
        frame.state.clear();

        let guard = FailOnUnwind(&frame.state);
        let step = frame.body.resume(&frame.state);
        guard.disarm();

        match step {
            Ok(Step::Yielded(())) => trace!(frame = ?id, "frame suspended"),
            Ok(Step::Complete(())) => {
                frame.state.finalize();
                trace!(frame = ?id, "frame finished");
            }
            Err(err) => {
                frame.state.fail();
                debug!(frame = ?id, %err, "frame failed");
            }
        }
        step
    }

    /// Release the frame and any resident value; the handle becomes empty.
    ///
    /// No producer code runs. Safe whether or not the producer finished.
    pub fn reset(&mut self) {
        if let Some(frame) = self.frame.take() {
            trace!(frame = ?FrameId::of(&frame.state), "frame released");
        }
    }

    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.frame, &mut other.frame);
    }
}

impl<T> Default for FrameHandle<'_, T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> PartialEq for FrameHandle<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl<T> Eq for FrameHandle<'_, T> {}

impl<T> fmt::Debug for FrameHandle<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameHandle")
            .field("id", &self.id())
            .field("status", &self.state().map(ProducerState::status))
            .finish()
    }
}
