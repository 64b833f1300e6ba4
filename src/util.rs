/// Numeric text helpers.
///
/// This module owns the two places where numbers cross into text and back:
/// rendering doubles in their canonical form (`7.0`, `1.0E7`) and reading
/// numeric text with the integer-versus-double rule used by values.
pub mod num;
