// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod drone_request;
pub mod index_response;
pub mod notes_request;

pub use drone_request::{DroneInstruction, DroneReply};
pub use index_response::IndexSummary;
pub use notes_request::NotesQuestions;
