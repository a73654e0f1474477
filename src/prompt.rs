//! Fixed instruction texts and user-content templates for every oracle query.
//!
//! Each constrained query pairs an instruction encoding the exact reply
//! grammar with a one-line user message built by [`step_message`] or
//! [`dish_message`]. Formatting here is pure; nothing touches conversation
//! state.

/// Persona instruction for conversational turns.
pub const PERSONA: &str = "You are a friendly cooking assistant guiding the user through a recipe \
     step by step. Be brief and encouraging.";

/// Reply grammar: `none`, or `{"caution": "<5 words>", "tip": "<7 words>"}`.
pub const SAFETY_INSTRUCTIONS: &str = "You are a kitchen safety expert. Given a recipe step, decide if it poses a \
     physical risk. Risks include: sharp tools (knives, graters, peelers), \
     heat (oven, stove, boiling water, hot pans), fire, steam, hot oil, or \
     anything that could burn, cut, or injure someone. If yes, reply with \
     JSON: {\"caution\": \"<5 words max>\", \"tip\": \"<7 words max>\"}. \
     If no risk, reply with only: none";

/// Reply grammar: `none`, or a JSON array drawn from the nine major
/// allergen categories.
pub const STEP_ALLERGEN_INSTRUCTIONS: &str = "You are a food allergen expert. Given a recipe step, identify any of the 9 \
     major allergens present: gluten, dairy, eggs, tree nuts, peanuts, soy, \
     fish, shellfish, sesame. Reply with a JSON array of allergen names found \
     (e.g. [\"gluten\", \"dairy\"]). If none are present, reply with only: none";

/// Reply grammar: `none`, or a JSON array of lowercase ingredient names.
/// Open vocabulary, specific ingredients included.
pub const DISH_ALLERGEN_INSTRUCTIONS: &str = "You are a food allergen expert. Given a dish or drink, identify ALL \
     specific ingredients someone might be allergic to. Include major \
     allergens (peanuts, tree nuts, dairy, eggs, gluten, soy, fish, \
     shellfish, sesame) AND specific ingredients (e.g. kiwi, strawberry, \
     avocado, mustard, celery, mango, cinnamon). Be specific — list \
     individual ingredients, not broad categories. Reply with a JSON array \
     of lowercase strings (e.g. [\"peanuts\", \"wheat\", \"kiwi\"]). If no \
     allergens, reply with only: none";

/// Reply grammar: a JSON array of short imperative step strings.
pub const STEP_LIST_INSTRUCTIONS: &str = "You are a cooking assistant. Given a dish or drink, produce the steps to \
     prepare it, in order, one short imperative sentence each. Reply with a \
     JSON array of strings (e.g. [\"Fill a glass with ice\", \"Pour in the \
     coffee\"]). Return ONLY the JSON array, no other text.";

/// User message embedding a recipe step.
pub fn step_message(step: &str) -> String {
    format!("Recipe step: {step}")
}

/// User message embedding a dish name.
pub fn dish_message(food: &str) -> String {
    format!("Dish: {food}")
}
