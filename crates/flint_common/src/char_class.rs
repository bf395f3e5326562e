//! Character classification used by the lexer.
//!
//! All functions are pure and total.

/// Checks if a character can start an identifier.
///
/// This is Unicode `XID_Start` plus `_` and `$`.
#[inline]
pub fn is_identifier_start(c: char) -> bool {
    c == '_' || c == '$' || unicode_ident::is_xid_start(c)
}

/// Checks if a character can continue an identifier.
///
/// This is Unicode `XID_Continue` plus `_` and `$`.
#[inline]
pub fn is_identifier_continue(c: char) -> bool {
    c == '_' || c == '$' || unicode_ident::is_xid_continue(c)
}

#[inline]
pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

#[inline]
pub fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

#[inline]
pub fn is_octal_digit(c: char) -> bool {
    matches!(c, '0'..='7')
}

/// Space or tab. Newlines are never inline whitespace.
#[inline]
pub fn is_inline_whitespace(c: char) -> bool {
    c == ' ' || c == '\t'
}
