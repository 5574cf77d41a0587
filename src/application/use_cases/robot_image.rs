// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::application::context::SolverContext;
use crate::utils::errors::{SolverError, SolverResult};

pub const TASK: &str = "robotid";

#[derive(Debug, Deserialize)]
struct RobotDescription {
    description: String,
}

fn prompt(description: &str) -> String {
    format!(
        r#"[Generate Image Based on Description]

The AI's primary task is to generate an image strictly according to the user's description, following all specified details and restrictions.

<prompt_objective>
Generate an image based precisely on the user-provided description, adhering to all explicit instructions and constraints.
</prompt_objective>

<prompt_rules>
- ABSOLUTELY FORBIDDEN to include any text in the image
- Always create the image in **PNG format** with **1024×1024 px** dimensions.
- Follow all user-provided details without adding or omitting elements.
- ABSOLUTELY FORBIDDEN to include any object or element explicitly excluded by the user (e.g., if instructed "do not include an elephant," ensure no elephant appears).
- In cases of contradictory instructions or updates, PRIORITIZE the latest instruction.
- When encountering ambiguous or imaginative language, interpret creatively but remain faithful to the description without deviating or assuming additional context.
- If user input lacks essential details, default to a **neutral, realistic** style unless another style is specified.

<examples>
1. **Typical Example:** "A robot walking on multiple legs like a spider, but without an abdomen, just a rotating camera."
   - Generate a spider-like robot with multiple legs and a rotating camera instead of an abdomen, adhering to realism.

2. **Edge Case (Prohibited Element):** "A landscape with a mountain and lake, but do not include any animals."
   - Generate only the landscape with mountains and lake, strictly avoiding any animals.

3. **Contradictory Instructions:** Initial input: "Create a jungle scene with birds." Update: "Do not include birds."
   - Exclude birds as per the latest instruction.

4. **Ambiguous Language:** "A futuristic city that feels ancient."
   - Interpret creatively, blending futuristic architecture with ancient design elements.

5. **Incomplete Detail:** "A forest with a glowing entity."
   - Default to a neutral, realistic style for the forest with a faintly glowing, indistinct shape.

</examples>

<conflict_resolution>
- When input conflicts arise, proceed based on the **latest user instruction**.
</conflict_resolution>
<user_prompt>
{}
</user_prompt>
"#,
        description
    )
}

/// 根据机器人描述生成图片并提交图片地址
pub async fn execute(ctx: &SolverContext) -> SolverResult<String> {
    let raw = ctx.headquarters.data_json("robotid.json").await?;
    let robot: RobotDescription = serde_json::from_value(raw)
        .map_err(|e| SolverError::validation(format!("robotid.json: {}", e)))?;

    let image_url = ctx.llm.generate_image(&prompt(&robot.description)).await?;
    info!(%image_url, "robot image generated");

    let reply = ctx.headquarters.report_checked(TASK, json!(image_url)).await?;
    Ok(reply.message)
}
