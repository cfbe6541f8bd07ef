use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, digit1},
    combinator::{all_consuming, map, map_res, opt, recognize},
    sequence::{delimited, pair},
    IResult,
};

/// Type used by the `mavlink_version` field of `HEARTBEAT`, stored as a plain `uint8_t`
pub const MAVLINK_VERSION_ALIAS: &str = "uint8_t_mavlink_version";

/// Parse a base type name, e.g. `uint16_t` or `float`
pub fn base_type(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_')(input)
}

/// Parse a bracketed array length, e.g. `[20]`
///
/// A leading sign is accepted so that `[-1]` is reported as a bad length and not as bad syntax
pub fn array_length(input: &str) -> IResult<&str, i64> {
    delimited(
        char('['),
        map_res(recognize(pair(opt(char('-')), digit1)), str::parse::<i64>),
        char(']'),
    )(input)
}

/// Parse a complete field type string
///
/// Yields the base type and the declared array length, [`None`] when the field is a scalar.
/// The whole input must be consumed.
pub fn type_string(input: &str) -> IResult<&str, (&str, Option<i64>)> {
    alt((
        map(all_consuming(tag(MAVLINK_VERSION_ALIAS)), |_| ("uint8_t", None)),
        all_consuming(pair(base_type, opt(array_length))),
    ))(input)
}
