use std::{
    sync::mpsc::{Receiver, SyncSender, sync_channel},
    thread::{JoinHandle, spawn},
};

use crate::{
    board::{Board, IllegalMove},
    movement::{Lan, Move},
};

enum Request {
    Submit(Lan, SyncSender<Result<Move, IllegalMove>>),
    Snapshot(SyncSender<Board>),
}

/// Owns a [`Board`] on its own thread. Moves are handed over through a
/// bounded queue and applied in arrival order.
pub struct RulesThread {
    handle: RulesHandle,
    thread: JoinHandle<Board>,
}
impl RulesThread {
    /// Starts the rules thread with room for `bound` pending requests.
    pub fn spawn(board: Board, bound: usize) -> Self {
        let (sender, receiver) = sync_channel(bound);
        let thread = spawn(move || serve(board, &receiver));
        RulesThread {
            handle: RulesHandle { sender },
            thread,
        }
    }
    pub fn handle(&self) -> RulesHandle {
        self.handle.clone()
    }
    /// Waits for every other handle to be dropped, then returns the final
    /// board.
    pub fn join(self) -> Board {
        drop(self.handle);
        match self.thread.join() {
            Ok(board) => board,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
}
fn serve(mut board: Board, requests: &Receiver<Request>) -> Board {
    for request in requests {
        match request {
            Request::Submit(lan, reply) => {
                let _ = reply.send(board.play(lan));
            }
            Request::Snapshot(reply) => {
                let _ = reply.send(board.clone());
            }
        }
    }
    board
}
/// Producer side of the queue. Cheap to clone and `Send`.
#[derive(Clone)]
pub struct RulesHandle {
    sender: SyncSender<Request>,
}
impl RulesHandle {
    /// Submits a move and waits for the verdict. `None` once the rules thread
    /// is gone.
    pub fn submit(&self, lan: Lan) -> Option<Result<Move, IllegalMove>> {
        let (reply, verdict) = sync_channel(1);
        self.sender.send(Request::Submit(lan, reply)).ok()?;
        verdict.recv().ok()
    }
    /// Queues a move without waiting; the verdict arrives on the returned
    /// receiver.
    pub fn submit_later(&self, lan: Lan) -> Option<Receiver<Result<Move, IllegalMove>>> {
        let (reply, verdict) = sync_channel(1);
        self.sender.send(Request::Submit(lan, reply)).ok()?;
        Some(verdict)
    }
    pub fn snapshot(&self) -> Option<Board> {
        let (reply, board) = sync_channel(1);
        self.sender.send(Request::Snapshot(reply)).ok()?;
        board.recv().ok()
    }
}
/// Collects the verdicts of several queued submissions in submission order.
pub fn verdicts(
    pending: impl IntoIterator<Item = Receiver<Result<Move, IllegalMove>>>,
) -> Vec<Option<Result<Move, IllegalMove>>> {
    pending
        .into_iter()
        .map(|verdict| verdict.recv().ok())
        .collect()
}
