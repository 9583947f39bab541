//! Per-rank generation loop.

use crate::context::ExecutionContext;
use crate::convergence;
use crate::error::{EngineError, GridError};
use crate::gather;
use crate::grid::Grid;
use crate::halo;
use crate::seed::SeedStrategy;
use crate::slice::SlicePair;
use crate::step;
use halolife_env::Communicator;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// What the most recent round found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// At least one rank saw a change
    Changed,

    /// No rank saw a change; the loop should stop
    Converged,
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Generations executed
    pub generations: u64,

    /// True if the loop stopped on global convergence rather than the cap
    pub converged: bool,
}

/// One rank's share of the simulation.
///
/// Every rank in the world must drive its engine through the same sequence
/// of calls; the collectives inside `advance` and `gather` pair up across
/// ranks call-for-call.
pub struct RankEngine<C: Communicator> {
    ctx: ExecutionContext<C>,
    buffers: SlicePair,
    generation: u64,
}

impl<C: Communicator> RankEngine<C> {
    /// Allocates both slice buffers for this rank's band of the board.
    pub fn new(comm: C, board_size: usize) -> Result<Self, EngineError> {
        let ctx = ExecutionContext::new(comm, board_size)?;
        let buffers = SlicePair::new(ctx.partition());

        debug!(
            "{}: rows {:?} of {} ({} local rows)",
            ctx.rank(),
            ctx.partition().global_rows(),
            board_size,
            ctx.partition().total_local_rows()
        );

        Ok(Self {
            ctx,
            buffers,
            generation: 0,
        })
    }

    /// Execution context of this rank.
    pub fn context(&self) -> &ExecutionContext<C> {
        &self.ctx
    }

    /// Generations executed so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Fills this rank's interior rows from `strategy`.
    pub fn seed(&mut self, strategy: &SeedStrategy) {
        strategy.fill(self.ctx.partition(), self.buffers.current_mut());
    }

    /// Copies this rank's rows out of a full board.
    pub fn load(&mut self, grid: &Grid) -> Result<(), EngineError> {
        let part = *self.ctx.partition();
        if grid.size() != part.board_size {
            return Err(GridError::SizeMismatch {
                expected: part.board_size,
                actual: grid.size(),
            }
            .into());
        }

        let rows = part.global_rows();
        self.buffers
            .current_mut()
            .load_interior(grid.rows(rows.start, rows.end));
        Ok(())
    }

    /// Runs one round: halo exchange, step, global stability check, swap.
    pub async fn advance(&mut self) -> Result<RoundOutcome, EngineError> {
        halo::exchange_ghost_rows(&self.ctx, self.buffers.current_mut()).await?;

        let (current, next) = self.buffers.read_write();
        step::compute_next(current, next);

        let local = convergence::locally_stable(&self.buffers);
        let global = convergence::globally_stable(&self.ctx, local).await?;

        self.buffers.swap();
        self.generation += 1;

        debug!(
            "{}: generation {} local_stable={} global_stable={}",
            self.ctx.rank(),
            self.generation,
            local,
            global
        );

        Ok(if global {
            RoundOutcome::Converged
        } else {
            RoundOutcome::Changed
        })
    }

    /// Advances until `max_generations` rounds have run or the board is stable.
    pub async fn run(&mut self, max_generations: u64) -> Result<RunSummary, EngineError> {
        let mut converged = false;
        while self.generation < max_generations && !converged {
            converged = self.advance().await? == RoundOutcome::Converged;
        }

        if self.ctx.is_root() {
            info!(
                "Stopped after {} generations ({})",
                self.generation,
                if converged { "converged" } else { "generation cap" }
            );
        }

        Ok(RunSummary {
            generations: self.generation,
            converged,
        })
    }

    /// Assembles the current generation at the root.
    ///
    /// Returns `Some` on the root only.
    pub async fn gather(&self) -> Result<Option<Grid>, EngineError> {
        gather::gather_grid(&self.ctx, self.buffers.current()).await
    }
}
