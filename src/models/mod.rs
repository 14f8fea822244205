pub mod diary;
pub mod diary_input;

pub use diary::{DiaryEntry, DiaryView, NewDiaryEntry};
pub use diary_input::{
    DiaryCountResponse, DiaryListResponse, EmotionCountResponse, MessageResponse, UpsertDiaryInput,
};
