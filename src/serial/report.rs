use std::str::FromStr;

use crate::utils::voltage_monitor_error::ReportError;

/// Template used when none is given, one line per report
pub const DEFAULT_REPORT_FORMAT: &str = "A2:%f A3:%f\n";

const DEFAULT_PRECISION: usize = 6;
const MAX_PRECISION: usize = 32;
const FIELD_COUNT: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field { precision: usize },
}

/// A printf style template with exactly two float fields.
/// Understands `%f`, `%.Nf` and `%%`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTemplate {
    segments: Vec<Segment>,
}

/// The two values carried by a line produced with a labeled template,
/// as read back on the receiving end of the serial link.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportLine {
    pub first: f32,
    pub second: f32,
}

impl ReportTemplate {
    /// Parses a template.
    ///
    /// # Arguments
    ///
    /// - `format`: The template, for example `"A2:%f A3:%f\n"`
    ///
    /// # Returns
    ///
    /// A `Result` containing the parsed `ReportTemplate`, or a `ReportError` if the template
    /// cannot be used to report two values.
    ///
    /// # Errors
    ///
    /// - `ReportError::UnsupportedSpecifier`: If a conversion other than `f` is used
    /// - `ReportError::InvalidPrecision`: If the precision of a field is not a number or above 32
    /// - `ReportError::WrongFieldCount`: If the template does not have exactly two fields
    pub fn parse(format: &str) -> Result<Self, ReportError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = format.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '%' {
                literal.push(c);
                continue;
            }
            match chars.next() {
                Some('%') => literal.push('%'),
                Some('f') => {
                    push_literal(&mut segments, &mut literal);
                    segments.push(Segment::Field { precision: DEFAULT_PRECISION });
                }
                Some('.') => {
                    let mut digits = String::new();
                    while let Some(&d) = chars.peek().filter(|d| d.is_ascii_digit()) {
                        digits.push(d);
                        chars.next();
                    }
                    match chars.next() {
                        Some('f') => {}
                        Some(other) => return Err(ReportError::UnsupportedSpecifier(other)),
                        None => return Err(ReportError::InvalidPrecision),
                    }
                    let precision = if digits.is_empty() {
                        0
                    } else {
                        digits.parse().map_err(|_| ReportError::InvalidPrecision)?
                    };
                    if precision > MAX_PRECISION {
                        return Err(ReportError::InvalidPrecision);
                    }
                    push_literal(&mut segments, &mut literal);
                    segments.push(Segment::Field { precision });
                }
                Some(other) => return Err(ReportError::UnsupportedSpecifier(other)),
                None => return Err(ReportError::UnsupportedSpecifier('%')),
            }
        }
        push_literal(&mut segments, &mut literal);

        let fields = segments
            .iter()
            .filter(|segment| matches!(segment, Segment::Field { .. }))
            .count();
        if fields != FIELD_COUNT {
            return Err(ReportError::WrongFieldCount(fields));
        }
        Ok(ReportTemplate { segments })
    }

    /// Formats the two values into the template, in order
    pub fn render(&self, first: f32, second: f32) -> String {
        let mut values = [first, second].into_iter();
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field { precision } => {
                    if let Some(value) = values.next() {
                        out.push_str(&format!("{:.*}", *precision, value));
                    }
                }
            }
        }
        out
    }
}

fn push_literal(segments: &mut Vec<Segment>, literal: &mut String) {
    if !literal.is_empty() {
        segments.push(Segment::Literal(std::mem::take(literal)));
    }
}

impl Default for ReportTemplate {
    fn default() -> Self {
        ReportTemplate {
            segments: vec![
                Segment::Literal(String::from("A2:")),
                Segment::Field { precision: DEFAULT_PRECISION },
                Segment::Literal(String::from(" A3:")),
                Segment::Field { precision: DEFAULT_PRECISION },
                Segment::Literal(String::from("\n")),
            ],
        }
    }
}

impl FromStr for ReportTemplate {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportTemplate::parse(s)
    }
}

impl ReportLine {
    /// Reads back the value following each label in a report line.
    /// A label only matches at the start of the line or after a character that is not
    /// alphanumeric, and its value ends where the number ends.
    ///
    /// # Errors
    ///
    /// - `ReportError::MissingLabel`: If a label is not in the line
    /// - `ReportError::InvalidValue`: If the text after a label is not a float
    pub fn parse(line: &str, labels: [&str; 2]) -> Result<Self, ReportError> {
        let first = value_after(line, labels[0])?;
        let second = value_after(line, labels[1])?;
        Ok(ReportLine { first, second })
    }
}

fn value_after(line: &str, label: &str) -> Result<f32, ReportError> {
    let label_is_word = label.chars().next().is_some_and(char::is_alphanumeric);
    let start = line
        .match_indices(label)
        .map(|(index, _)| index)
        .find(|&index| {
            !label_is_word
                || line[..index]
                    .chars()
                    .next_back()
                    .map_or(true, |previous| !previous.is_alphanumeric())
        })
        .ok_or_else(|| ReportError::MissingLabel(label.to_string()))?
        + label.len();
    let rest = &line[start..];
    let number = &rest[..float_prefix_len(rest)];
    number.parse::<f32>().map_err(|_| {
        let token = rest.split_whitespace().next().unwrap_or("");
        ReportError::InvalidValue(token.to_string())
    })
}

/// Length of the decimal float at the start of `text`: sign, digits, fraction and exponent
fn float_prefix_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let digits_from = |mut index: usize| {
        while bytes.get(index).is_some_and(u8::is_ascii_digit) {
            index += 1;
        }
        index
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    end = digits_from(end);
    if bytes.get(end) == Some(&b'.') {
        end = digits_from(end + 1);
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent = end + 1;
        if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
            exponent += 1;
        }
        let exponent_end = digits_from(exponent);
        if exponent_end > exponent {
            end = exponent_end;
        }
    }
    end
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test0_default_template_matches_printf_output() {
        let template = ReportTemplate::default();
        assert_eq!(template, ReportTemplate::parse(DEFAULT_REPORT_FORMAT).unwrap());
        assert_eq!(template.render(11.0, 0.5), "A2:11.000000 A3:0.500000\n");
    }

    #[test]
    fn test1_precision_and_escapes() {
        let template: ReportTemplate = "%.2f%% | %.0f V\r\n".parse().unwrap();
        assert_eq!(template.render(18.15443, 2.6), "18.15% | 3 V\r\n");

        let template = ReportTemplate::parse("%.f,%.3f").unwrap();
        assert_eq!(template.render(1.4, 0.0), "1,0.000");
    }

    #[test]
    fn test2_rejects_templates_without_two_fields() {
        assert_eq!(ReportTemplate::parse("A2:%f\n"), Err(ReportError::WrongFieldCount(1)));
        assert_eq!(ReportTemplate::parse("%f %f %f"), Err(ReportError::WrongFieldCount(3)));
        assert_eq!(ReportTemplate::parse("100%%"), Err(ReportError::WrongFieldCount(0)));
    }

    #[test]
    fn test3_rejects_unsupported_conversions() {
        assert_eq!(ReportTemplate::parse("%d %f"), Err(ReportError::UnsupportedSpecifier('d')));
        assert_eq!(ReportTemplate::parse("%f %.2d"), Err(ReportError::UnsupportedSpecifier('d')));
        assert_eq!(ReportTemplate::parse("%f %f %"), Err(ReportError::UnsupportedSpecifier('%')));
        assert_eq!(ReportTemplate::parse("%f %.3"), Err(ReportError::InvalidPrecision));
    }

    #[test]
    fn test4_reads_back_a_rendered_line() {
        let line = ReportTemplate::default().render(18.25, 3.5);
        let read = ReportLine::parse(line.trim_end(), ["A2:", "A3:"]).unwrap();
        assert_eq!(read, ReportLine { first: 18.25, second: 3.5 });
    }

    #[test]
    fn test5_precision_is_capped() {
        assert!(ReportTemplate::parse("%.32f %f").is_ok());
        assert_eq!(ReportTemplate::parse("%.33f %f"), Err(ReportError::InvalidPrecision));
        assert_eq!(
            ReportTemplate::parse("%.1000000000f %f"),
            Err(ReportError::InvalidPrecision)
        );
    }

    #[test]
    fn test6_labels_match_whole_words_only() {
        let read = ReportLine::parse("VA2:1.000000 A2:2.000000", ["A2:", "VA2:"]).unwrap();
        assert_eq!(read, ReportLine { first: 2.0, second: 1.0 });
    }

    #[test]
    fn test7_values_end_where_the_number_ends() {
        let template = ReportTemplate::parse("A2:%f,A3:%f;\n").unwrap();
        let line = template.render(1.0, 2.0);
        assert_eq!(line, "A2:1.000000,A3:2.000000;\n");
        let read = ReportLine::parse(&line, ["A2:", "A3:"]).unwrap();
        assert_eq!(read, ReportLine { first: 1.0, second: 2.0 });

        let read = ReportLine::parse("A2:-1.5e1V|A3:+2.5e", ["A2:", "A3:"]).unwrap();
        assert_eq!(read, ReportLine { first: -15.0, second: 2.5 });
    }

    #[test]
    fn test8_reading_back_reports_what_is_wrong() {
        assert_eq!(
            ReportLine::parse("A2:1.000000", ["A2:", "A3:"]),
            Err(ReportError::MissingLabel(String::from("A3:")))
        );
        assert_eq!(
            ReportLine::parse("A2:abc A3:1.0", ["A2:", "A3:"]),
            Err(ReportError::InvalidValue(String::from("abc")))
        );
        assert_eq!(
            ReportLine::parse("A2: A3:1.0", ["A2:", "A3:"]),
            Err(ReportError::InvalidValue(String::from("A3:1.0")))
        );
    }
}
