//! Instruction text sent to the completion endpoint, one builder per stage.
//!
//! Each builder is a total pure function: role-framing preamble, the upstream
//! context interpolated verbatim, and the exact output contract the parser
//! expects on the way back.

use crate::wire::Stage;

/// Marker pair delimiting the expert conversation in a spec-stage reply.
pub const CONVERSATION_OPEN: &str = "<conversation>";
pub const CONVERSATION_CLOSE: &str = "</conversation>";

/// Marker pair delimiting the JSON business spec in a spec-stage reply.
pub const SPEC_OPEN: &str = "<master_spec>";
pub const SPEC_CLOSE: &str = "</master_spec>";

/// Stage 1: simulated expert discussion plus the business spec JSON.
pub fn spec_prompt(idea: &str) -> String {
    format!(
        r#"You are a team of startup experts having a strategic discussion. The team consists of:
- CEO: Visionary leader focused on strategy and market fit
- Designer: UX/UI expert focused on user experience
- Engineer: Technical architect focused on feasibility and tech stack
- Marketer: Growth expert focused on go-to-market strategy
- CFO: Financial expert focused on business model and projections

The startup idea is: "{idea}"

Have a realistic conversation where each expert provides their perspective. The conversation should:
1. Analyze the idea critically
2. Identify the core problem and solution
3. Define the target audience
4. Discuss product features and tech stack
5. Establish business model and pricing
6. Plan marketing strategy
7. Project basic financials

Format your response as:
{conversation_open}
[Each message as: **[Role]**: Message content]
{conversation_close}

{spec_open}
{{
  "startup": {{
    "name": "string",
    "tagline": "string",
    "problem": "string",
    "solution": "string",
    "target_audience": "string"
  }},
  "product": {{
    "features": ["string"],
    "tech_stack": ["string"],
    "mvp_timeline": "string"
  }},
  "business": {{
    "revenue_model": "string",
    "pricing": "string",
    "competitors": ["string"]
  }},
  "marketing": {{
    "channels": ["string"],
    "messaging": "string",
    "launch_strategy": "string"
  }},
  "financials": {{
    "startup_costs": 0,
    "monthly_burn": 0,
    "revenue_projections": [
      {{"month": 1, "revenue": 0, "costs": 0}}
    ]
  }}
}}
{spec_close}"#,
        idea = idea,
        conversation_open = CONVERSATION_OPEN,
        conversation_close = CONVERSATION_CLOSE,
        spec_open = SPEC_OPEN,
        spec_close = SPEC_CLOSE,
    )
}

/// Stage 2: landing page structure from the serialized business spec.
pub fn landing_prompt(spec_json: &str) -> String {
    format!(
        r#"Based on this startup spec:
{spec_json}

Create a high-converting landing page structure. Return ONLY valid JSON:

{{
  "hero": {{
    "headline": "string",
    "subheadline": "string",
    "cta": "string"
  }},
  "features": [
    {{
      "title": "string",
      "description": "string",
      "icon": "string (lucide icon name)"
    }}
  ],
  "testimonials": [
    {{
      "quote": "string",
      "author": "string",
      "role": "string"
    }}
  ],
  "pricing": [
    {{
      "tier": "string",
      "price": "string",
      "features": ["string"]
    }}
  ]
}}"#
    )
}

/// Stage 3: ten-slide pitch deck from the serialized business spec.
pub fn pitch_prompt(spec_json: &str) -> String {
    format!(
        r#"Based on this startup spec:
{spec_json}

Create a 10-slide pitch deck. Return ONLY valid JSON:

{{
  "slides": [
    {{
      "title": "string",
      "content": "string (markdown format)",
      "type": "title"
    }}
  ]
}}

Include slides for: Title, Problem, Solution, Market Size, Business Model, Traction, Competition, Go-to-Market, Team, and Ask."#
    )
}

/// Stage 4: marketing assets from the serialized business spec.
pub fn marketing_prompt(spec_json: &str) -> String {
    format!(
        r#"Based on this startup spec:
{spec_json}

Create compelling marketing assets. Return ONLY valid JSON:

{{
  "tweets": ["string"],
  "linkedin_post": "string",
  "email_sequence": ["string"],
  "ad_copy": [
    {{
      "platform": "string",
      "headline": "string",
      "body": "string"
    }}
  ]
}}"#
    )
}

/// Dispatch by stage. `context` is the raw idea for the spec stage and the
/// serialized business spec for every later stage.
pub fn build(stage: Stage, context: &str) -> String {
    match stage {
        Stage::Spec => spec_prompt(context),
        Stage::Landing => landing_prompt(context),
        Stage::Pitch => pitch_prompt(context),
        Stage::Marketing => marketing_prompt(context),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_prompt_embeds_idea_and_markers() {
        let p = build(Stage::Spec, "a meal planning app");
        assert!(p.contains("\"a meal planning app\""));
        assert!(p.contains(CONVERSATION_OPEN));
        assert!(p.contains(CONVERSATION_CLOSE));
        assert!(p.contains(SPEC_OPEN));
        assert!(p.contains(SPEC_CLOSE));
    }

    #[test]
    fn later_stages_embed_spec_and_demand_bare_json() {
        for stage in [Stage::Landing, Stage::Pitch, Stage::Marketing] {
            let p = build(stage, "{\"startup\":{}}");
            assert!(p.contains("{\"startup\":{}}"), "{} lost context", stage.name());
            assert!(p.contains("Return ONLY valid JSON"));
        }
    }
}
