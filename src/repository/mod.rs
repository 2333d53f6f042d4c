//! Repository seam between the board engine and assessment storage
//!
//! The engine never persists anything itself: it reads the current records
//! through [`AssessmentRepository::fetch_assessments`] and hands status
//! changes to [`AssessmentRepository::update_assessment`].

mod file;
mod memory;

pub use file::FileRepository;
pub use memory::MemoryRepository;

use crate::error::Result;
use crate::types::{Assessment, AssessmentId, AssessmentUpdate};

/// Source of assessment records and sink for partial updates
#[async_trait::async_trait]
pub trait AssessmentRepository: Send + Sync {
    /// Get the current list of assessment records
    async fn fetch_assessments(&self) -> Result<Vec<Assessment>>;

    /// Apply a partial update to one record
    async fn update_assessment(&self, id: &AssessmentId, update: AssessmentUpdate) -> Result<()>;
}
