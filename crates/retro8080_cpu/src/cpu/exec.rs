//! Opcode handlers, one self-contained function per instruction group.
//!
//! Handlers are referenced from the descriptor table and share the
//! `table::Handler` signature. Operands arrive pre-fetched in `Decoded`;
//! a handler only touches PC when it transfers control, and then returns
//! `Flow::Jump`.

mod arith;
mod branch;
mod logical;
mod stack;
mod system;
mod transfer;
