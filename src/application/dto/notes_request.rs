// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::BTreeMap;

/// 问题编号到问题内容，例如 `{"01": "Podaj adres mailowy do firmy SoftoAI"}`
pub type NotesQuestions = BTreeMap<String, String>;
