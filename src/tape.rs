//! Adept-style two-stack tape for reverse-mode AD.
//!
//! Every recorded operation stores its precomputed partial derivatives
//! (multipliers) and operand indices during the forward pass, so the reverse
//! sweep is a single multiply-accumulate loop. Used by [`crate::Reverse`].

use std::cell::Cell;

use crate::Float;

/// Sentinel index for a constant (not recorded on tape).
pub const CONSTANT: u32 = u32::MAX;

/// Result lives at `lhs_index`; operands span `[prev.end_plus_one .. end_plus_one)`.
#[derive(Clone, Copy, Debug)]
struct Statement {
    lhs_index: u32,
    end_plus_one: u32,
}

const SENTINEL: Statement = Statement {
    lhs_index: 0,
    end_plus_one: 0,
};

/// Reverse-mode tape: statements, multipliers and operand indices.
pub struct Tape<F: Float> {
    statements: Vec<Statement>,
    multipliers: Vec<F>,
    indices: Vec<u32>,
    num_variables: u32,
}

impl<F: Float> Default for Tape<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> Tape<F> {
    /// Create an empty tape.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a tape with room for roughly `est_ops` operations.
    pub fn with_capacity(est_ops: usize) -> Self {
        let mut statements = Vec::with_capacity(est_ops + 1);
        // statements[i - 1] is always valid for i >= 1.
        statements.push(SENTINEL);
        Tape {
            statements,
            multipliers: Vec::with_capacity(est_ops * 2),
            indices: Vec::with_capacity(est_ops * 2),
            num_variables: 0,
        }
    }

    /// Number of slots allocated so far (inputs plus intermediates).
    #[inline]
    pub fn num_variables(&self) -> usize {
        self.num_variables as usize
    }

    /// Register an independent variable and return its slot.
    ///
    /// Inputs get no statement, so their adjoints survive the sweep.
    #[inline]
    pub fn new_variable(&mut self) -> u32 {
        let idx = self.num_variables;
        self.num_variables += 1;
        idx
    }

    /// Record `result = f(operand)` with `multiplier = df/d(operand)`.
    #[inline]
    pub fn push_unary(&mut self, operand_idx: u32, multiplier: F) -> u32 {
        self.push(&[(operand_idx, multiplier)])
    }

    /// Record a binary operation with precomputed partials.
    #[inline]
    pub fn push_binary(&mut self, lhs_idx: u32, lhs_mult: F, rhs_idx: u32, rhs_mult: F) -> u32 {
        self.push(&[(lhs_idx, lhs_mult), (rhs_idx, rhs_mult)])
    }

    fn push(&mut self, operands: &[(u32, F)]) -> u32 {
        let result_idx = self.num_variables;
        self.num_variables += 1;
        for &(idx, mult) in operands {
            if idx != CONSTANT {
                self.multipliers.push(mult);
                self.indices.push(idx);
            }
        }
        self.statements.push(Statement {
            lhs_index: result_idx,
            end_plus_one: self.multipliers.len() as u32,
        });
        result_idx
    }

    /// Reverse sweep seeded with `1` at `seed_index`.
    pub fn reverse(&self, seed_index: u32) -> Vec<F> {
        self.reverse_seeded(&[(seed_index, F::one())])
    }

    /// Reverse sweep with arbitrary adjoint seeds. Constant seeds are ignored.
    pub fn reverse_seeded(&self, seeds: &[(u32, F)]) -> Vec<F> {
        let mut adjoints = vec![F::zero(); self.num_variables as usize];
        for &(idx, seed) in seeds {
            if idx != CONSTANT {
                adjoints[idx as usize] = adjoints[idx as usize] + seed;
            }
        }

        for i in (1..self.statements.len()).rev() {
            let stmt = self.statements[i];
            let a = adjoints[stmt.lhs_index as usize];
            if a == F::zero() {
                continue;
            }
            adjoints[stmt.lhs_index as usize] = F::zero();
            let start = self.statements[i - 1].end_plus_one as usize;
            for j in start..stmt.end_plus_one as usize {
                let k = self.indices[j] as usize;
                adjoints[k] = adjoints[k] + self.multipliers[j] * a;
            }
        }
        adjoints
    }
}

thread_local! {
    static TAPE_F32: Cell<*mut Tape<f32>> = const { Cell::new(std::ptr::null_mut()) };
    static TAPE_F64: Cell<*mut Tape<f64>> = const { Cell::new(std::ptr::null_mut()) };
}

/// Selects the thread-local tape slot for a float type.
pub trait TapeThreadLocal: Float {
    fn cell() -> &'static std::thread::LocalKey<Cell<*mut Tape<Self>>>;
}

impl TapeThreadLocal for f32 {
    fn cell() -> &'static std::thread::LocalKey<Cell<*mut Tape<Self>>> {
        &TAPE_F32
    }
}

impl TapeThreadLocal for f64 {
    fn cell() -> &'static std::thread::LocalKey<Cell<*mut Tape<Self>>> {
        &TAPE_F64
    }
}

/// Run `f` against this thread's active tape. Panics if none is active.
#[inline]
pub fn with_active_tape<F: TapeThreadLocal, R>(f: impl FnOnce(&mut Tape<F>) -> R) -> R {
    F::cell().with(|cell| {
        let ptr = cell.get();
        assert!(
            !ptr.is_null(),
            "no active tape; record through chainrule::grad() or chainrule::vjp()"
        );
        // SAFETY: a live TapeGuard keeps the pointee borrowed for the whole
        // recording scope, and the thread-local confines access to one thread.
        let tape = unsafe { &mut *ptr };
        f(tape)
    })
}

/// RAII guard installing a tape as the thread's active tape.
///
/// The previously active tape is restored on drop, so recordings nest.
pub struct TapeGuard<'a, F: TapeThreadLocal> {
    prev: *mut Tape<F>,
    _tape: std::marker::PhantomData<&'a mut Tape<F>>,
}

impl<'a, F: TapeThreadLocal> TapeGuard<'a, F> {
    pub fn new(tape: &'a mut Tape<F>) -> Self {
        let prev = F::cell().with(|cell| cell.replace(tape as *mut Tape<F>));
        TapeGuard {
            prev,
            _tape: std::marker::PhantomData,
        }
    }
}

impl<F: TapeThreadLocal> Drop for TapeGuard<'_, F> {
    fn drop(&mut self) {
        F::cell().with(|cell| cell.set(self.prev));
    }
}
