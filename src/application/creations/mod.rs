//! Creation use cases: metered generation, listings, and the like-toggle

pub mod use_cases;

pub use use_cases::{
    GenerateArticleUseCase, GenerateBlogTitleUseCase, GenerateImageUseCase,
    ListPublishedCreationsUseCase, ListUserCreationsUseCase, RemoveBackgroundUseCase,
    RemoveObjectUseCase, ReviewResumeUseCase, ToggleLikeUseCase,
};
