// Application layer: solve orchestration, result extraction, verification

pub mod allocator;
pub mod extract;
pub mod verify;

pub use allocator::AllocationService;
