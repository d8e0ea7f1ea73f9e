//! The step queue.

use std::collections::VecDeque;
use std::fmt;

use tracing::debug;

use crate::core::{EngineError, EngineResult};

use super::{AckTicket, QueueStatus, Step, StepStatus};

/// Continuation fired once every step is done.
type Completion<C> = Box<dyn FnOnce(&mut C)>;

/// Runs enqueued steps one at a time, in enqueue order.
///
/// ## Behavior
///
/// - `enqueue()`: appends a step; allowed at any time, including while the
///   queue is suspended (the step runs after the current tail)
/// - `run()` / `run_then()`: polls steps until one suspends or none remain
/// - `acknowledge()`: resumes the suspended step and keeps running
///
/// A completion continuation registered with `run_then()` fires exactly
/// once, after the last step is done. With nothing enqueued it fires
/// immediately.
pub struct StepQueue<C> {
    /// Steps not yet done. The front step is the running one.
    pending: VecDeque<Box<dyn Step<C>>>,

    /// Ticket the front step is waiting on.
    outstanding: Option<AckTicket>,

    /// Continuation for the current run.
    on_all_done: Option<Completion<C>>,

    /// Next ticket to issue.
    next_ticket: u64,

    /// Steps completed over the lifetime of the queue.
    completed: u64,
}

impl<C> Default for StepQueue<C> {
    fn default() -> Self {
        Self {
            pending: VecDeque::new(),
            outstanding: None,
            on_all_done: None,
            next_ticket: 0,
            completed: 0,
        }
    }
}

impl<C> fmt::Debug for StepQueue<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepQueue")
            .field("pending", &self.pending.len())
            .field("outstanding", &self.outstanding)
            .field("completed", &self.completed)
            .finish()
    }
}

impl<C> StepQueue<C> {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step to the tail.
    pub fn enqueue(&mut self, step: impl Step<C> + 'static) {
        self.pending.push_back(Box::new(step));
    }

    /// Number of steps not yet done (including a suspended one).
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Check if no steps are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// The ticket the queue is waiting on, if any.
    #[must_use]
    pub fn outstanding(&self) -> Option<AckTicket> {
        self.outstanding
    }

    /// Check if the queue is waiting on an acknowledgment.
    #[must_use]
    pub fn is_suspended(&self) -> bool {
        self.outstanding.is_some()
    }

    /// Steps completed over the lifetime of the queue.
    #[must_use]
    pub fn completed_steps(&self) -> u64 {
        self.completed
    }

    /// Run pending steps until one suspends or none remain.
    pub fn run(&mut self, ctx: &mut C) -> EngineResult<QueueStatus> {
        if let Some(ticket) = self.outstanding {
            return Err(EngineError::QueueSuspended(ticket));
        }
        Ok(self.drain(ctx))
    }

    /// Run pending steps, firing `on_all_done` once the last one is done.
    ///
    /// Replaces any continuation left over from an earlier run that has not
    /// fired yet.
    pub fn run_then(
        &mut self,
        ctx: &mut C,
        on_all_done: impl FnOnce(&mut C) + 'static,
    ) -> EngineResult<QueueStatus> {
        if let Some(ticket) = self.outstanding {
            return Err(EngineError::QueueSuspended(ticket));
        }
        self.on_all_done = Some(Box::new(on_all_done));
        Ok(self.drain(ctx))
    }

    /// Acknowledge the outstanding ticket and resume.
    ///
    /// Any ticket other than the outstanding one is rejected without
    /// touching the queue.
    pub fn acknowledge(&mut self, ctx: &mut C, ticket: AckTicket) -> EngineResult<QueueStatus> {
        match self.outstanding {
            Some(outstanding) if outstanding == ticket => {
                debug!(%ticket, "acknowledged");
                self.outstanding = None;
                Ok(self.drain(ctx))
            }
            outstanding => Err(EngineError::UnexpectedAcknowledgment {
                received: ticket,
                outstanding,
            }),
        }
    }

    fn drain(&mut self, ctx: &mut C) -> QueueStatus {
        while let Some(step) = self.pending.front_mut() {
            match step.poll(ctx) {
                StepStatus::Done => {
                    debug!(step = step.label(), index = self.completed, "step done");
                    self.pending.pop_front();
                    self.completed += 1;
                }
                StepStatus::Suspended(request) => {
                    let ticket = AckTicket(self.next_ticket);
                    self.next_ticket += 1;
                    self.outstanding = Some(ticket);
                    debug!(step = step.label(), %ticket, ?request, "step suspended");
                    return QueueStatus::Suspended { ticket, request };
                }
            }
        }

        if let Some(on_all_done) = self.on_all_done.take() {
            on_all_done(ctx);
        }
        QueueStatus::Complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CardId;
    use crate::stack::AckRequest;

    fn record(name: &'static str) -> impl FnMut(&mut Vec<&'static str>) -> StepStatus {
        move |log: &mut Vec<&'static str>| {
            log.push(name);
            StepStatus::Done
        }
    }

    fn wait_once(name: &'static str) -> impl FnMut(&mut Vec<&'static str>) -> StepStatus {
        let mut waited = false;
        move |log: &mut Vec<&'static str>| {
            if waited {
                log.push(name);
                StepStatus::Done
            } else {
                waited = true;
                StepStatus::Suspended(AckRequest::SignalAbility { card: CardId::new(0) })
            }
        }
    }

    #[test]
    fn test_empty_queue_completes_immediately() {
        let mut queue: StepQueue<Vec<&'static str>> = StepQueue::new();
        let mut log = Vec::new();

        let status = queue
            .run_then(&mut log, |log: &mut Vec<&'static str>| log.push("all done"))
            .unwrap();

        assert_eq!(status, QueueStatus::Complete);
        assert_eq!(log, vec!["all done"]);
    }

    #[test]
    fn test_runs_in_enqueue_order() {
        let mut queue = StepQueue::new();
        queue.enqueue(record("a"));
        queue.enqueue(record("b"));
        queue.enqueue(record("c"));

        let mut log = Vec::new();
        let status = queue
            .run_then(&mut log, |log: &mut Vec<&'static str>| log.push("all done"))
            .unwrap();

        assert!(status.is_complete());
        assert_eq!(log, vec!["a", "b", "c", "all done"]);
        assert_eq!(queue.completed_steps(), 3);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_suspension_blocks_next_step() {
        let mut queue = StepQueue::new();
        queue.enqueue(wait_once("a"));
        queue.enqueue(record("b"));

        let mut log = Vec::new();
        let status = queue.run(&mut log).unwrap();
        let ticket = status.ticket().unwrap();

        assert!(log.is_empty());
        assert!(queue.is_suspended());
        assert_eq!(queue.len(), 2);

        let status = queue.acknowledge(&mut log, ticket).unwrap();
        assert!(status.is_complete());
        assert_eq!(log, vec!["a", "b"]);
    }

    #[test]
    fn test_double_acknowledgment_rejected() {
        let mut queue = StepQueue::new();
        queue.enqueue(wait_once("a"));

        let mut log = Vec::new();
        let ticket = queue.run(&mut log).unwrap().ticket().unwrap();
        queue.acknowledge(&mut log, ticket).unwrap();

        let err = queue.acknowledge(&mut log, ticket).unwrap_err();
        assert_eq!(
            err,
            EngineError::UnexpectedAcknowledgment {
                received: ticket,
                outstanding: None,
            }
        );
        assert_eq!(log, vec!["a"]);
    }

    #[test]
    fn test_stale_ticket_rejected_while_suspended() {
        let mut queue = StepQueue::new();
        queue.enqueue(wait_once("a"));
        queue.enqueue(wait_once("b"));

        let mut log = Vec::new();
        let first = queue.run(&mut log).unwrap().ticket().unwrap();
        let second = queue.acknowledge(&mut log, first).unwrap().ticket().unwrap();
        assert_ne!(first, second);

        assert!(queue.acknowledge(&mut log, first).is_err());
        assert_eq!(queue.outstanding(), Some(second));
        assert_eq!(log, vec!["a"]);
    }

    #[test]
    fn test_run_while_suspended_is_error() {
        let mut queue = StepQueue::new();
        queue.enqueue(wait_once("a"));

        let mut log = Vec::new();
        let ticket = queue.run(&mut log).unwrap().ticket().unwrap();
        assert_eq!(queue.run(&mut log), Err(EngineError::QueueSuspended(ticket)));
    }

    #[test]
    fn test_enqueue_while_suspended_runs_after_tail() {
        let mut queue = StepQueue::new();
        queue.enqueue(wait_once("a"));
        queue.enqueue(record("b"));

        let mut log = Vec::new();
        let ticket = queue
            .run_then(&mut log, |log: &mut Vec<&'static str>| log.push("all done"))
            .unwrap()
            .ticket()
            .unwrap();
        queue.enqueue(record("late"));

        queue.acknowledge(&mut log, ticket).unwrap();
        assert_eq!(log, vec!["a", "b", "late", "all done"]);
    }

    #[test]
    fn test_completion_fires_once() {
        let mut queue = StepQueue::new();
        queue.enqueue(record("a"));

        let mut log = Vec::new();
        queue
            .run_then(&mut log, |log: &mut Vec<&'static str>| log.push("all done"))
            .unwrap();
        queue.run(&mut log).unwrap();

        assert_eq!(log, vec!["a", "all done"]);
    }
}
