//! Semantic checker categories and the numeric code translation table.
//!
//! The semantic engine reports findings by category name (`UnusedImport`),
//! while shared lint configuration usually lists numeric codes (`F401`).
//! `FlakeKind` is the closed set of categories; `FLAKE_CODES` is the fixed
//! table used when ignore lists need translating.

use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Category tag attached to every semantic diagnostic.
pub enum FlakeKind {
    UnusedImport,
    ImportShadowedByLoopVar,
    ImportStarUsed,
    LateFutureImport,
    ImportStarUsage,
    ImportStarNotPermitted,
    FutureFeatureNotDefined,
    PercentFormatInvalidFormat,
    PercentFormatExpectedMapping,
    PercentFormatExpectedSequence,
    PercentFormatExtraNamedArguments,
    PercentFormatMissingArgument,
    PercentFormatMixedPositionalAndNamed,
    PercentFormatPositionalCountMismatch,
    PercentFormatStarRequiresSequence,
    PercentFormatUnsupportedFormatCharacter,
    StringDotFormatInvalidFormat,
    StringDotFormatExtraNamedArguments,
    StringDotFormatExtraPositionalArguments,
    StringDotFormatMissingArgument,
    StringDotFormatMixingAutomatic,
    FStringMissingPlaceholders,
    TStringMissingPlaceholders,
    MultiValueRepeatedKeyLiteral,
    MultiValueRepeatedKeyVariable,
    TooManyExpressionsInStarredAssignment,
    TwoStarredExpressions,
    AssertTuple,
    IsLiteral,
    InvalidPrintSyntax,
    IfTuple,
    BreakOutsideLoop,
    ContinueOutsideLoop,
    ContinueInFinally,
    YieldOutsideFunction,
    ReturnWithArgsInsideGenerator,
    ReturnOutsideFunction,
    DefaultExceptNotLast,
    DoctestSyntaxError,
    ForwardAnnotationSyntaxError,
    CommentAnnotationSyntaxError,
    RedefinedWhileUnused,
    RedefinedInListComp,
    UndefinedExport,
    UndefinedName,
    UndefinedLocal,
    UnusedIndirectAssignment,
    DuplicateArgument,
    UnusedVariable,
    UnusedAnnotation,
    RaiseNotImplemented,
    /// Output the adapter could not match against any known template.
    Unclassified,
}

/// Numeric code to category, in code order.
pub static FLAKE_CODES: &[(&str, FlakeKind)] = &[
    ("F401", FlakeKind::UnusedImport),
    ("F402", FlakeKind::ImportShadowedByLoopVar),
    ("F403", FlakeKind::ImportStarUsed),
    ("F404", FlakeKind::LateFutureImport),
    ("F405", FlakeKind::ImportStarUsage),
    ("F406", FlakeKind::ImportStarNotPermitted),
    ("F407", FlakeKind::FutureFeatureNotDefined),
    ("F501", FlakeKind::PercentFormatInvalidFormat),
    ("F502", FlakeKind::PercentFormatExpectedMapping),
    ("F503", FlakeKind::PercentFormatExpectedSequence),
    ("F504", FlakeKind::PercentFormatExtraNamedArguments),
    ("F505", FlakeKind::PercentFormatMissingArgument),
    ("F506", FlakeKind::PercentFormatMixedPositionalAndNamed),
    ("F507", FlakeKind::PercentFormatPositionalCountMismatch),
    ("F508", FlakeKind::PercentFormatStarRequiresSequence),
    ("F509", FlakeKind::PercentFormatUnsupportedFormatCharacter),
    ("F521", FlakeKind::StringDotFormatInvalidFormat),
    ("F522", FlakeKind::StringDotFormatExtraNamedArguments),
    ("F523", FlakeKind::StringDotFormatExtraPositionalArguments),
    ("F524", FlakeKind::StringDotFormatMissingArgument),
    ("F525", FlakeKind::StringDotFormatMixingAutomatic),
    ("F541", FlakeKind::FStringMissingPlaceholders),
    ("F542", FlakeKind::TStringMissingPlaceholders),
    ("F601", FlakeKind::MultiValueRepeatedKeyLiteral),
    ("F602", FlakeKind::MultiValueRepeatedKeyVariable),
    ("F621", FlakeKind::TooManyExpressionsInStarredAssignment),
    ("F622", FlakeKind::TwoStarredExpressions),
    ("F631", FlakeKind::AssertTuple),
    ("F632", FlakeKind::IsLiteral),
    ("F633", FlakeKind::InvalidPrintSyntax),
    ("F634", FlakeKind::IfTuple),
    ("F701", FlakeKind::BreakOutsideLoop),
    ("F702", FlakeKind::ContinueOutsideLoop),
    ("F703", FlakeKind::ContinueInFinally),
    ("F704", FlakeKind::YieldOutsideFunction),
    ("F705", FlakeKind::ReturnWithArgsInsideGenerator),
    ("F706", FlakeKind::ReturnOutsideFunction),
    ("F707", FlakeKind::DefaultExceptNotLast),
    ("F721", FlakeKind::DoctestSyntaxError),
    ("F722", FlakeKind::ForwardAnnotationSyntaxError),
    ("F723", FlakeKind::CommentAnnotationSyntaxError),
    ("F811", FlakeKind::RedefinedWhileUnused),
    ("F812", FlakeKind::RedefinedInListComp),
    ("F821", FlakeKind::UndefinedName),
    ("F822", FlakeKind::UndefinedExport),
    ("F823", FlakeKind::UndefinedLocal),
    ("F824", FlakeKind::UnusedIndirectAssignment),
    ("F831", FlakeKind::DuplicateArgument),
    ("F841", FlakeKind::UnusedVariable),
    ("F842", FlakeKind::UnusedAnnotation),
    ("F901", FlakeKind::RaiseNotImplemented),
];

/// Look up the category name for a numeric code.
pub fn category_for_code(code: &str) -> Option<&'static str> {
    FLAKE_CODES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, kind)| kind.name())
}

impl FlakeKind {
    /// Category name, as used in ignore lists and rendered output.
    pub fn name(self) -> &'static str {
        match self {
            Self::UnusedImport => "UnusedImport",
            Self::ImportShadowedByLoopVar => "ImportShadowedByLoopVar",
            Self::ImportStarUsed => "ImportStarUsed",
            Self::LateFutureImport => "LateFutureImport",
            Self::ImportStarUsage => "ImportStarUsage",
            Self::ImportStarNotPermitted => "ImportStarNotPermitted",
            Self::FutureFeatureNotDefined => "FutureFeatureNotDefined",
            Self::PercentFormatInvalidFormat => "PercentFormatInvalidFormat",
            Self::PercentFormatExpectedMapping => "PercentFormatExpectedMapping",
            Self::PercentFormatExpectedSequence => "PercentFormatExpectedSequence",
            Self::PercentFormatExtraNamedArguments => "PercentFormatExtraNamedArguments",
            Self::PercentFormatMissingArgument => "PercentFormatMissingArgument",
            Self::PercentFormatMixedPositionalAndNamed => "PercentFormatMixedPositionalAndNamed",
            Self::PercentFormatPositionalCountMismatch => "PercentFormatPositionalCountMismatch",
            Self::PercentFormatStarRequiresSequence => "PercentFormatStarRequiresSequence",
            Self::PercentFormatUnsupportedFormatCharacter => {
                "PercentFormatUnsupportedFormatCharacter"
            }
            Self::StringDotFormatInvalidFormat => "StringDotFormatInvalidFormat",
            Self::StringDotFormatExtraNamedArguments => "StringDotFormatExtraNamedArguments",
            Self::StringDotFormatExtraPositionalArguments => {
                "StringDotFormatExtraPositionalArguments"
            }
            Self::StringDotFormatMissingArgument => "StringDotFormatMissingArgument",
            Self::StringDotFormatMixingAutomatic => "StringDotFormatMixingAutomatic",
            Self::FStringMissingPlaceholders => "FStringMissingPlaceholders",
            Self::TStringMissingPlaceholders => "TStringMissingPlaceholders",
            Self::MultiValueRepeatedKeyLiteral => "MultiValueRepeatedKeyLiteral",
            Self::MultiValueRepeatedKeyVariable => "MultiValueRepeatedKeyVariable",
            Self::TooManyExpressionsInStarredAssignment => "TooManyExpressionsInStarredAssignment",
            Self::TwoStarredExpressions => "TwoStarredExpressions",
            Self::AssertTuple => "AssertTuple",
            Self::IsLiteral => "IsLiteral",
            Self::InvalidPrintSyntax => "InvalidPrintSyntax",
            Self::IfTuple => "IfTuple",
            Self::BreakOutsideLoop => "BreakOutsideLoop",
            Self::ContinueOutsideLoop => "ContinueOutsideLoop",
            Self::ContinueInFinally => "ContinueInFinally",
            Self::YieldOutsideFunction => "YieldOutsideFunction",
            Self::ReturnWithArgsInsideGenerator => "ReturnWithArgsInsideGenerator",
            Self::ReturnOutsideFunction => "ReturnOutsideFunction",
            Self::DefaultExceptNotLast => "DefaultExceptNotLast",
            Self::DoctestSyntaxError => "DoctestSyntaxError",
            Self::ForwardAnnotationSyntaxError => "ForwardAnnotationSyntaxError",
            Self::CommentAnnotationSyntaxError => "CommentAnnotationSyntaxError",
            Self::RedefinedWhileUnused => "RedefinedWhileUnused",
            Self::RedefinedInListComp => "RedefinedInListComp",
            Self::UndefinedExport => "UndefinedExport",
            Self::UndefinedName => "UndefinedName",
            Self::UndefinedLocal => "UndefinedLocal",
            Self::UnusedIndirectAssignment => "UnusedIndirectAssignment",
            Self::DuplicateArgument => "DuplicateArgument",
            Self::UnusedVariable => "UnusedVariable",
            Self::UnusedAnnotation => "UnusedAnnotation",
            Self::RaiseNotImplemented => "RaiseNotImplemented",
            Self::Unclassified => "Unclassified",
        }
    }

    /// printf-style message template; `%r`, `%s` and `%d` take positional
    /// arguments and `%%` is a literal percent sign.
    pub fn template(self) -> &'static str {
        match self {
            Self::UnusedImport => "%r imported but unused",
            Self::ImportShadowedByLoopVar => "import %r from line %r shadowed by loop variable",
            Self::ImportStarUsed => "'from %s import *' used; unable to detect undefined names",
            Self::LateFutureImport => {
                "from __future__ imports must occur at the beginning of the file"
            }
            Self::ImportStarUsage => "%r may be undefined, or defined from star imports: %s",
            Self::ImportStarNotPermitted => "'from %s import *' only allowed at module level",
            Self::FutureFeatureNotDefined => "future feature %s is not defined",
            Self::PercentFormatInvalidFormat => "'...' %% ... has invalid format string: %s",
            Self::PercentFormatExpectedMapping => "'...' %% ... expected mapping but got sequence",
            Self::PercentFormatExpectedSequence => {
                "'...' %% ... expected sequence but got mapping"
            }
            Self::PercentFormatExtraNamedArguments => {
                "'...' %% ... has unused named argument(s): %s"
            }
            Self::PercentFormatMissingArgument => {
                "'...' %% ... is missing argument(s) for placeholder(s): %s"
            }
            Self::PercentFormatMixedPositionalAndNamed => {
                "'...' %% ... has mixed positional and named placeholders"
            }
            Self::PercentFormatPositionalCountMismatch => {
                "'...' %% ... has %d placeholder(s) but %d substitution(s)"
            }
            Self::PercentFormatStarRequiresSequence => {
                "'...' %% ... `*` specifier requires sequence"
            }
            Self::PercentFormatUnsupportedFormatCharacter => {
                "'...' %% ... has unsupported format character %r"
            }
            Self::StringDotFormatInvalidFormat => "'...'.format(...) has invalid format string: %s",
            Self::StringDotFormatExtraNamedArguments => {
                "'...'.format(...) has unused named argument(s): %s"
            }
            Self::StringDotFormatExtraPositionalArguments => {
                "'...'.format(...) has unused arguments at position(s): %s"
            }
            Self::StringDotFormatMissingArgument => {
                "'...'.format(...) is missing argument(s) for placeholder(s): %s"
            }
            Self::StringDotFormatMixingAutomatic => {
                "'...'.format(...) mixes automatic and manual numbering"
            }
            Self::FStringMissingPlaceholders => "f-string is missing placeholders",
            Self::TStringMissingPlaceholders => "t-string is missing placeholders",
            Self::MultiValueRepeatedKeyLiteral => "dictionary key %r repeated with different values",
            Self::MultiValueRepeatedKeyVariable => {
                "dictionary key variable %s repeated with different values"
            }
            Self::TooManyExpressionsInStarredAssignment => {
                "too many expressions in star-unpacking assignment"
            }
            Self::TwoStarredExpressions => "two starred expressions in assignment",
            Self::AssertTuple => "assertion is always true, perhaps remove parentheses?",
            Self::IsLiteral => {
                "use ==/!= to compare constant literals (str, bytes, int, float, tuple)"
            }
            Self::InvalidPrintSyntax => "use of >> is invalid with print function",
            Self::IfTuple => "'if tuple literal' is always true, perhaps remove accidental comma?",
            Self::BreakOutsideLoop => "'break' outside loop",
            Self::ContinueOutsideLoop => "'continue' not properly in loop",
            Self::ContinueInFinally => "'continue' not supported inside 'finally' clause",
            Self::YieldOutsideFunction => "'yield' outside function",
            Self::ReturnWithArgsInsideGenerator => "'return' with argument inside generator",
            Self::ReturnOutsideFunction => "'return' outside function",
            Self::DefaultExceptNotLast => "default 'except:' must be last",
            Self::DoctestSyntaxError => "syntax error in doctest",
            Self::ForwardAnnotationSyntaxError => "syntax error in forward annotation %r",
            Self::CommentAnnotationSyntaxError => "syntax error in type comment %r",
            Self::RedefinedWhileUnused => "redefinition of unused %r from line %r",
            Self::RedefinedInListComp => "list comprehension redefines %r from line %r",
            Self::UndefinedExport => "undefined name %r in __all__",
            Self::UndefinedName => "undefined name %r",
            Self::UndefinedLocal => "local variable %r %s referenced before assignment",
            Self::UnusedIndirectAssignment => "`%s %s` is unused: name is never assigned in scope",
            Self::DuplicateArgument => "duplicate argument %r in function definition",
            Self::UnusedVariable => "local variable %r is assigned to but never used",
            Self::UnusedAnnotation => "local variable %r is annotated but never used",
            Self::RaiseNotImplemented => {
                "'raise NotImplemented' should be 'raise NotImplementedError'"
            }
            Self::Unclassified => "%s",
        }
    }

    /// Numeric code for this category, if it has one.
    pub fn code(self) -> Option<&'static str> {
        FLAKE_CODES
            .iter()
            .find(|(_, kind)| *kind == self)
            .map(|(code, _)| *code)
    }
}

// More specific templates must come before templates they overlap with
// (`undefined name %r in __all__` before `undefined name %r`).
static MATCHERS: Lazy<Vec<(FlakeKind, Regex)>> = Lazy::new(|| {
    let mut kinds: Vec<FlakeKind> = FLAKE_CODES.iter().map(|(_, k)| *k).collect();
    if let (Some(export), Some(name)) = (
        kinds.iter().position(|k| *k == FlakeKind::UndefinedExport),
        kinds.iter().position(|k| *k == FlakeKind::UndefinedName),
    ) {
        if name < export {
            kinds.swap(name, export);
        }
    }
    kinds
        .into_iter()
        .filter_map(|kind| template_regex(kind.template()).map(|re| (kind, re)))
        .collect()
});

/// Build an anchored regex that captures every placeholder of `template`.
fn template_regex(template: &str) -> Option<Regex> {
    let mut pattern = String::from("^");
    let mut literal = String::new();
    let mut chars = template.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            literal.push(c);
            continue;
        }
        match chars.next() {
            Some('%') => literal.push('%'),
            Some(spec) => {
                pattern.push_str(&regex::escape(&literal));
                literal.clear();
                pattern.push_str(if spec == 'd' { r"(-?\d+)" } else { "(.+?)" });
            }
            None => literal.push('%'),
        }
    }
    pattern.push_str(&regex::escape(&literal));
    pattern.push('$');
    Regex::new(&pattern).ok()
}

/// Classify a rendered message into its category and positional arguments.
///
/// Arguments are returned exactly as they appear in the text, so `%r`
/// arguments keep their quotes. Unknown messages become `Unclassified`
/// carrying the whole text as the single argument.
pub fn classify(message: &str) -> (FlakeKind, Vec<String>) {
    for (kind, re) in MATCHERS.iter() {
        if let Some(caps) = re.captures(message) {
            let args = caps
                .iter()
                .skip(1)
                .flatten()
                .map(|m| m.as_str().to_string())
                .collect();
            return (*kind, args);
        }
    }
    (FlakeKind::Unclassified, vec![message.to_string()])
}
