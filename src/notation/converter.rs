//! Notation converter
//!
//! Infix sources go through a precedence-driven operator stack
//! ([`shunt`]). Prefix and postfix sources go through a single operand-stack
//! machine ([`fold_operands`]) parameterized by scan direction and output
//! layout. Both work on borrowed [`Token`]s; text is rendered once at the end.

use serde::Serialize;
use smallvec::{smallvec, SmallVec};
use std::iter;

use crate::config::EngineConfig;
use crate::error::{NotationError, Result};
use crate::notation::cursor::{Cursor, Direction};
use crate::notation::kind::{identify, NotationKind};
use crate::notation::token::{Operator, Token};

/// Output shape of a conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    /// Fully parenthesized, no whitespace: `(3+(4*2))`
    Infix,
    /// Space separated: `+ 3 * 4 2`
    Prefix,
    /// Space separated: `3 4 2 * +`
    Postfix,
}

impl Layout {
    fn of(kind: NotationKind) -> Result<Self> {
        match kind {
            NotationKind::Infix => Ok(Layout::Infix),
            NotationKind::Prefix => Ok(Layout::Prefix),
            NotationKind::Postfix => Ok(Layout::Postfix),
            NotationKind::Unknown => Err(unknown_notation()),
        }
    }
}

/// Arena node built while folding a prefix or postfix source
#[derive(Debug, Clone, Copy)]
enum Node<'a> {
    Leaf(&'a str),
    /// Operator with the arena indices of its left and right operands
    Bin(Operator, usize, usize),
}

/// Pending work in [`flatten`]
enum Step<'a> {
    Visit(usize),
    Emit(Token<'a>),
}

/// Operator-stack entry while scanning infix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    /// Stack bottom
    Sentinel,
    Open,
    Op(Operator),
}

impl Slot {
    #[inline]
    fn tier(self) -> u8 {
        match self {
            Slot::Op(op) => op.tier(),
            Slot::Sentinel | Slot::Open => 0,
        }
    }
}

/// All three renderings of one expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notations {
    /// Notation the input was identified as
    pub source: NotationKind,
    pub infix: String,
    pub prefix: String,
    pub postfix: String,
}

fn unknown_notation() -> NotationError {
    NotationError::invalid("cannot identify the current notation of the expression")
}

fn underflow(op: Operator) -> NotationError {
    NotationError::InvalidExpression(format!("operator '{}' is missing an operand", op))
}

/// Whether an incoming operator pops the operator on top of the stack
///
/// `^` pops on equal tier, the other operators only on strictly higher tier.
/// A chain like `2^3^2` therefore groups as `(2^3)^2`, while `3-2-1` is left
/// on the stack and groups as `3-(2-1)`.
#[inline]
pub fn should_pop(incoming: Operator, top_tier: u8) -> bool {
    if incoming == Operator::Pow {
        incoming.tier() <= top_tier
    } else {
        incoming.tier() < top_tier
    }
}

/// Infix token stream to postfix token sequence
///
/// The stream is treated as if wrapped in one extra pair of parentheses.
fn shunt<'a, I>(tokens: I) -> Result<Vec<Token<'a>>>
where
    I: IntoIterator<Item = Result<Token<'a>>>,
{
    let mut output = Vec::new();
    let mut stack: SmallVec<[Slot; 16]> = smallvec![Slot::Sentinel, Slot::Open];

    for token in tokens.into_iter().chain(iter::once(Ok(Token::Close))) {
        let token = token?;
        match token {
            Token::Operand(_) => output.push(token),
            Token::Open => stack.push(Slot::Open),
            Token::Close => loop {
                match stack.pop() {
                    Some(Slot::Op(op)) => output.push(Token::Operator(op)),
                    Some(Slot::Open) => break,
                    Some(Slot::Sentinel) | None => {
                        return Err(NotationError::invalid("unbalanced ')'"));
                    }
                }
            },
            Token::Operator(op) => {
                while stack.last().is_some_and(|top| should_pop(op, top.tier())) {
                    if let Some(Slot::Op(top)) = stack.pop() {
                        output.push(Token::Operator(top));
                    }
                }
                stack.push(Slot::Op(op));
            }
        }
    }

    if stack.len() != 1 {
        return Err(NotationError::invalid("unbalanced '('"));
    }

    check_arity(&output)?;
    Ok(output)
}

/// Verify a postfix sequence reduces to exactly one value
fn check_arity(postfix: &[Token<'_>]) -> Result<()> {
    let mut depth = 0usize;
    for token in postfix {
        match *token {
            Token::Operand(_) => depth += 1,
            Token::Operator(op) => {
                if depth < 2 {
                    return Err(underflow(op));
                }
                depth -= 1;
            }
            Token::Open | Token::Close => {
                return Err(NotationError::invalid("unexpected parenthesis"));
            }
        }
    }
    leftover(depth)
}

fn leftover(depth: usize) -> Result<()> {
    match depth {
        1 => Ok(()),
        0 => Err(NotationError::invalid("empty expression")),
        n => Err(NotationError::InvalidExpression(format!(
            "{} operands are not joined by an operator",
            n
        ))),
    }
}

/// Operand-stack machine shared by the prefix and postfix sources
///
/// Scanning forward (postfix source) the top of the stack is the right
/// operand; scanning backward (prefix source) it is the left one. Operators
/// only link arena indices, so the fold is linear in the token count.
fn fold_operands<'a, I>(
    tokens: I,
    direction: Direction,
    layout: Layout,
) -> Result<Vec<Token<'a>>>
where
    I: IntoIterator<Item = Result<Token<'a>>>,
{
    let mut nodes: Vec<Node<'a>> = Vec::new();
    let mut stack: Vec<usize> = Vec::new();

    for token in tokens {
        let node = match token? {
            Token::Operand(text) => Node::Leaf(text),
            Token::Operator(op) => {
                let top = stack.pop().ok_or_else(|| underflow(op))?;
                let second = stack.pop().ok_or_else(|| underflow(op))?;
                match direction {
                    Direction::Forward => Node::Bin(op, second, top),
                    Direction::Backward => Node::Bin(op, top, second),
                }
            }
            Token::Open | Token::Close => {
                return Err(NotationError::invalid(
                    "parentheses are only allowed in infix expressions",
                ));
            }
        };
        stack.push(nodes.len());
        nodes.push(node);
    }

    leftover(stack.len())?;
    Ok(stack
        .pop()
        .map(|root| flatten(&nodes, root, layout))
        .unwrap_or_default())
}

/// Walk the tree under `root` into one token sequence in the target layout
fn flatten<'a>(nodes: &[Node<'a>], root: usize, layout: Layout) -> Vec<Token<'a>> {
    let mut out = Vec::with_capacity(nodes.len() * 2);
    let mut work = vec![Step::Visit(root)];

    while let Some(step) = work.pop() {
        let index = match step {
            Step::Emit(token) => {
                out.push(token);
                continue;
            }
            Step::Visit(index) => index,
        };

        // Steps are pushed in reverse of their output order
        match nodes[index] {
            Node::Leaf(text) => out.push(Token::Operand(text)),
            Node::Bin(op, left, right) => match layout {
                Layout::Infix => work.extend([
                    Step::Emit(Token::Close),
                    Step::Visit(right),
                    Step::Emit(Token::Operator(op)),
                    Step::Visit(left),
                    Step::Emit(Token::Open),
                ]),
                Layout::Prefix => work.extend([
                    Step::Visit(right),
                    Step::Visit(left),
                    Step::Emit(Token::Operator(op)),
                ]),
                Layout::Postfix => work.extend([
                    Step::Emit(Token::Operator(op)),
                    Step::Visit(right),
                    Step::Visit(left),
                ]),
            },
        }
    }

    out
}

fn render(tokens: &[Token<'_>], layout: Layout) -> String {
    let mut out = String::with_capacity(tokens.len() * 2);
    for (i, token) in tokens.iter().enumerate() {
        if i > 0 && layout != Layout::Infix {
            out.push(' ');
        }
        token.write_to(&mut out);
    }
    out
}

/// Prefix and postfix operands need whitespace to be told apart; a compact
/// source reads every character as its own operand.
#[inline]
fn is_grouped(expression: &str) -> bool {
    expression.contains(char::is_whitespace)
}

fn infix_to_postfix_tokens(expression: &str) -> Result<Vec<Token<'_>>> {
    shunt(Cursor::new(expression, Direction::Forward).tokens(true))
}

/// Read the infix backward with parentheses swapped, convert, reverse
fn infix_to_prefix_tokens(expression: &str) -> Result<Vec<Token<'_>>> {
    let mirrored = Cursor::new(expression, Direction::Backward)
        .tokens(true)
        .map(|token| token.map(Token::mirrored));
    let mut tokens = shunt(mirrored)?;
    tokens.reverse();
    Ok(tokens)
}

/// Rewrite `expression` from notation `from` into notation `to`
///
/// Converting into the same notation normalizes the text: infix becomes fully
/// parenthesized, prefix and postfix get single-space separators.
pub fn convert_to(expression: &str, from: NotationKind, to: NotationKind) -> Result<String> {
    let expression = expression.trim();
    let layout = Layout::of(to)?;

    let tokens = match from {
        NotationKind::Infix => match layout {
            Layout::Postfix => infix_to_postfix_tokens(expression)?,
            Layout::Prefix => infix_to_prefix_tokens(expression)?,
            Layout::Infix => {
                let postfix = infix_to_postfix_tokens(expression)?;
                fold_operands(postfix.into_iter().map(Ok), Direction::Forward, Layout::Infix)?
            }
        },
        NotationKind::Prefix => {
            let grouped = is_grouped(expression);
            let tokens = Cursor::new(expression, Direction::Backward).tokens(grouped);
            fold_operands(tokens, Direction::Backward, layout)?
        }
        NotationKind::Postfix => {
            let grouped = is_grouped(expression);
            let tokens = Cursor::new(expression, Direction::Forward).tokens(grouped);
            fold_operands(tokens, Direction::Forward, layout)?
        }
        NotationKind::Unknown => return Err(unknown_notation()),
    };

    Ok(render(&tokens, layout))
}

/// Rewrite `expression` into the two notations other than `kind`
///
/// Order: Infix -> (prefix, postfix), Prefix -> (infix, postfix),
/// Postfix -> (infix, prefix).
pub fn convert(expression: &str, kind: NotationKind) -> Result<(String, String)> {
    convert_with(expression, kind, &EngineConfig::default())
}

pub fn convert_with(
    expression: &str,
    kind: NotationKind,
    config: &EngineConfig,
) -> Result<(String, String)> {
    let expression = expression.trim();
    config.check_length(expression)?;

    let (first, second) = match kind {
        NotationKind::Infix => (NotationKind::Prefix, NotationKind::Postfix),
        NotationKind::Prefix => (NotationKind::Infix, NotationKind::Postfix),
        NotationKind::Postfix => (NotationKind::Infix, NotationKind::Prefix),
        NotationKind::Unknown => return Err(unknown_notation()),
    };

    Ok((
        convert_to(expression, kind, first)?,
        convert_to(expression, kind, second)?,
    ))
}

/// Identify `expression` and render it in all three notations
pub fn convert_all(expression: &str) -> Result<Notations> {
    convert_all_with(expression, &EngineConfig::default())
}

pub fn convert_all_with(expression: &str, config: &EngineConfig) -> Result<Notations> {
    let expression = expression.trim();
    config.check_length(expression)?;

    let source = identify(expression);
    if source == NotationKind::Unknown {
        return Err(NotationError::UnidentifiableNotation(expression.to_string()));
    }

    Ok(Notations {
        source,
        infix: convert_to(expression, source, NotationKind::Infix)?,
        prefix: convert_to(expression, source, NotationKind::Prefix)?,
        postfix: convert_to(expression, source, NotationKind::Postfix)?,
    })
}
