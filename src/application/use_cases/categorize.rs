// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use futures::future::try_join_all;
use tracing::{debug, info};

use crate::application::context::SolverContext;
use crate::domain::models::classification::{Categories, Category, Classified};
use crate::domain::models::report::ReportReply;
use crate::domain::services::llm_service::IMAGE_TRANSCRIPTION_PROMPT;
use crate::utils::errors::SolverResult;

pub const TASK: &str = "kategorie";
pub const AUDIO_DIR: &str = "8/audio";
pub const IMAGES_DIR: &str = "8/images";
pub const TEXTS_DIR: &str = "8/texts";

pub fn classification_prompt(text: &str) -> String {
    format!(
        r#"<prompt_objective>
Classify input text as related to "people" or "hardware" based on its content, ensuring accurate categorization for further processing or analysis. Return "0" if the text does not relate to either category, people if is related to people and hardware if it is related to hardware.
</prompt_objective>

<prompt_rules>
- ONLY classify text as people if it clearly relates to "people"
- ONLY classify text as hardware if it clearly relates to "hardware"
- If the text is ambiguous or unrelated, return 0.
- If the input text is empty or invalid, return 0.
- Use semantic and contextual analysis to determine relevance.
- Maintain neutrality: evaluate solely based on content without bias toward either category.
- ABSOLUTELY FORBIDDEN to classify text as people or hardware unless clear indicators for "people" or "hardware" are present.
- Provide consistent and interpretable classifications for all inputs.
</prompt_rules>

<prompt_output_format>
- Output a single ternary value:
  - people if the text relates to "people"
  - hardware if the text relates to "hardware"
  - 0 if the text does not relate to either or is ambiguous.
</prompt_output_format>

<prompt_examples>
- **Example 1**:
  **Input:** "The workers gathered at the site to begin their daily tasks."
  **Output:** people

- **Example 2**:
  **Input:** "The automated system completed the calculations."
  **Output:** hardware

- **Example 3**:
  **Input:** "In the forest, there was a strange noise, and the team couldn't determine its origin."
  **Output:** 0

- **Example 4**:
  **Input:** "The sun set behind the mountains, painting the sky in shades of orange."
  **Output:** 0

- **Example 5**:
  **Input:** ""
  **Output:** 0

- **Example 6**:
  **Input:** "The engineer repaired the robotic arm, ensuring it was ready for the next task."
  **Output:** hardware

- **Example 7**:
  **Input:** "Czas na odpoczynek w cieniu drzew."
  **Output:** 0


</prompt_examples>
<text>
{}
</text>
"#,
        text
    )
}

#[derive(Debug, Clone, Copy)]
enum SourceKind {
    Audio,
    Image,
    Text,
}

async fn transcript(
    ctx: &SolverContext,
    kind: SourceKind,
    dir: &str,
    name: &str,
) -> SolverResult<String> {
    let key = format!("{}/{}", dir, name);
    match kind {
        SourceKind::Audio => ctx.llm.transcribe(name, ctx.read_bytes(&key).await?).await,
        SourceKind::Image => {
            let image = ctx.read_bytes(&key).await?;
            ctx.llm.read_image(IMAGE_TRANSCRIPTION_PROMPT, &image).await
        }
        SourceKind::Text => ctx.read_text(&key).await,
    }
}

async fn classify(
    ctx: &SolverContext,
    kind: SourceKind,
    dir: &'static str,
    name: String,
) -> SolverResult<Classified> {
    let text = transcript(ctx, kind, dir, &name).await?;
    let reply = ctx.llm.complete(&classification_prompt(&text)).await?;
    let category = Category::from_reply(&reply);
    debug!(file = %name, ?category, "file classified");
    Ok(Classified {
        file_name: name,
        category,
    })
}

/// 转写音频、图片和文本文件，按 people / hardware 分类后提交
pub async fn execute(ctx: &SolverContext) -> SolverResult<ReportReply> {
    let mut sources = Vec::new();
    for (kind, dir) in [
        (SourceKind::Audio, AUDIO_DIR),
        (SourceKind::Image, IMAGES_DIR),
        (SourceKind::Text, TEXTS_DIR),
    ] {
        for name in ctx.storage.list(dir).await? {
            sources.push((kind, dir, name));
        }
    }
    info!(files = sources.len(), "classifying files");

    let classified = try_join_all(
        sources
            .into_iter()
            .map(|(kind, dir, name)| classify(ctx, kind, dir, name)),
    )
    .await?;

    let categories = Categories::collect(classified);
    info!(
        people = categories.people.len(),
        hardware = categories.hardware.len(),
        "files categorized"
    );

    ctx.headquarters
        .report_checked(TASK, serde_json::to_value(&categories)?)
        .await
}
