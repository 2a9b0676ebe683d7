//! Error types for the extraction engine and the draft helpers.
//!
//! Every message is written for direct display to the user.

use thiserror::Error;

/// The only way extraction fails: no date and no time signal in the input.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFailure {
    /// The input was blank.
    #[error("입력된 내용이 없습니다.")]
    EmptyInput,

    /// Neither a date nor a time expression was found.
    #[error("날짜나 시간을 이해하지 못했어요. 예: '내일 오후 3시 치과'")]
    Unrecognized,
}

impl ParseFailure {
    /// The user-facing message.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Problems an edited draft can have before it is submitted.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftError {
    #[error("종료 시간이 시작 시간보다 늦어야 해요.")]
    EndNotAfterStart,

    #[error("일정 길이가 너무 길어요.")]
    OutOfRange,
}

/// A calendar backend request could not be built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    #[error("일정 정보가 부족합니다.")]
    MissingDraftFields,

    #[error("필요한 정보가 누락되었습니다.")]
    MissingPatchFields,

    #[error("일정 ID가 필요합니다.")]
    MissingEventId,
}
