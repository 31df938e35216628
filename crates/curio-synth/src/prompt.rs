//! Fixed description-generation prompt.

/// Template with `{product_name}` / `{product_desc}` slots.
pub const PROMPT_TEMPLATE: &str = "Generate a short, creative, and appealing product description \
for a '{product_name}'. The original description is: '{product_desc}'. \
Make it sound luxurious and inviting for a modern home.";

/// Substitute both slots verbatim. Deterministic; no escaping beyond the
/// model's own tokenization.
pub fn build_prompt(product_name: &str, product_desc: &str) -> String {
    PROMPT_TEMPLATE
        .replace("{product_name}", product_name)
        .replace("{product_desc}", product_desc)
}
