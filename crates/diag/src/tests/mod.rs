// Unit tests for diag: hexdump layout and the in-memory sink.

use super::*;
use alloc::string::ToString;
use alloc::vec;
use alloc::vec::Vec;

mod hexdump;
mod memory_sink;
