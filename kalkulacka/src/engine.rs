//! Calculator engine
//!
//! Turns key presses into a running display string. Operands and operators
//! are collected as the user types and evaluated strictly left to right on
//! `=`, so `2 + 3 * 4` gives 20.

use std::fmt;

use crate::format::{format_number, parse_number};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == c)
    }

    /// Division by zero gives NaN instead of an infinity.
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            Operator::Add => left + right,
            Operator::Subtract => left - right,
            Operator::Multiply => left * right,
            Operator::Divide => {
                if right == 0.0 {
                    f64::NAN
                } else {
                    left / right
                }
            }
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// One key of the keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalcKey {
    Digit(char),
    Point,
    Op(Operator),
    Equals,
    Clear,
    Backspace,
    Negate,
}

/// Visual family of a key, used to pick its fill color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Digit,
    Operator,
    Function,
    Equals,
}

impl CalcKey {
    pub fn label(self) -> String {
        match self {
            CalcKey::Digit(d) => d.to_string(),
            CalcKey::Point => ".".to_string(),
            CalcKey::Op(op) => op.to_string(),
            CalcKey::Equals => "=".to_string(),
            CalcKey::Clear => "C".to_string(),
            CalcKey::Backspace => "⌫".to_string(),
            CalcKey::Negate => "±".to_string(),
        }
    }

    pub fn kind(self) -> KeyKind {
        match self {
            CalcKey::Digit(_) | CalcKey::Point => KeyKind::Digit,
            CalcKey::Op(_) => KeyKind::Operator,
            CalcKey::Clear | CalcKey::Backspace | CalcKey::Negate => KeyKind::Function,
            CalcKey::Equals => KeyKind::Equals,
        }
    }

    /// Map a typed character to a key.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0'..='9' => Some(CalcKey::Digit(c)),
            '.' | ',' => Some(CalcKey::Point),
            '=' => Some(CalcKey::Equals),
            'n' | 'N' => Some(CalcKey::Negate),
            'c' | 'C' => Some(CalcKey::Clear),
            'x' | 'X' => Some(CalcKey::Op(Operator::Multiply)),
            _ => Operator::from_char(c).map(CalcKey::Op),
        }
    }
}

/// Coarse position of the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Nothing pending, waiting for the first digit.
    Idle,
    /// A number is being typed.
    EnteringOperand,
    /// An operator was pressed and its right operand has not started.
    OperatorPending,
}

#[derive(Debug, Clone)]
pub struct Engine {
    operands: Vec<f64>,
    operators: Vec<Operator>,
    current_input: String,
    entry_mode: bool,
    expression: String,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self {
            operands: Vec::new(),
            operators: Vec::new(),
            current_input: "0".to_string(),
            entry_mode: true,
            expression: String::new(),
        }
    }

    pub fn press(&mut self, key: CalcKey) {
        match key {
            CalcKey::Digit(d) => self.digit(d),
            CalcKey::Point => self.decimal_point(),
            CalcKey::Op(op) => self.operator(op),
            CalcKey::Equals => self.equals(),
            CalcKey::Clear => self.clear(),
            CalcKey::Backspace => self.backspace(),
            CalcKey::Negate => self.negate(),
        }
    }

    pub fn digit(&mut self, d: char) {
        if !d.is_ascii_digit() {
            return;
        }
        if self.entry_mode || self.current_input == "0" {
            self.current_input = d.to_string();
        } else {
            self.current_input.push(d);
        }
        self.entry_mode = false;
    }

    pub fn decimal_point(&mut self) {
        if self.entry_mode {
            self.current_input = "0.".to_string();
            self.entry_mode = false;
        } else if !self.current_input.contains('.') {
            self.current_input.push('.');
        }
    }

    pub fn operator(&mut self, op: Operator) {
        let repeated = self.entry_mode;
        let confirmed = !self.current_input.is_empty();
        if confirmed {
            self.operands.push(parse_number(&self.current_input));
        }

        match self.operators.last_mut() {
            Some(last) if repeated && !confirmed => *last = op,
            _ => self.operators.push(op),
        }

        self.current_input.clear();
        self.entry_mode = true;
        self.rebuild_expression();
    }

    pub fn equals(&mut self) {
        if self.current_input.is_empty() && self.operands.is_empty() {
            return;
        }
        if !self.current_input.is_empty() {
            self.operands.push(parse_number(&self.current_input));
        }

        let result = match self.operands.split_first() {
            Some((&first, rest)) => self
                .operators
                .iter()
                .zip(rest)
                .fold(first, |acc, (op, &rhs)| op.apply(acc, rhs)),
            None => 0.0,
        };

        self.current_input = format_number(result);
        self.operands.clear();
        self.operators.clear();
        self.expression.clear();
        self.entry_mode = true;
    }

    pub fn clear(&mut self) {
        self.current_input = "0".to_string();
        self.operands.clear();
        self.operators.clear();
        self.expression.clear();
        self.entry_mode = true;
    }

    pub fn backspace(&mut self) {
        if self.entry_mode {
            self.current_input = "0".to_string();
        } else if self.current_input.chars().count() <= 1 {
            self.current_input = "0".to_string();
            self.entry_mode = true;
        } else {
            self.current_input.pop();
            if self.current_input == "-" {
                self.current_input = "0".to_string();
                self.entry_mode = true;
            }
        }
    }

    /// Flips the sign of the number being typed. Between operands there is
    /// nothing to negate and the call does nothing.
    pub fn negate(&mut self) {
        if self.current_input.is_empty() {
            return;
        }
        let value = parse_number(&self.current_input) * -1.0;
        self.current_input = format_number(value);
    }

    /// Text shown on the calculator screen.
    pub fn display(&self) -> String {
        if self.expression.is_empty() {
            if self.current_input.is_empty() {
                "0".to_string()
            } else {
                self.current_input.clone()
            }
        } else if self.current_input.is_empty() {
            self.expression.clone()
        } else {
            format!("{} {}", self.expression, self.current_input)
        }
    }

    /// The display split in two: the pending expression and the number
    /// being typed. Joined with a space they give [`Engine::display`].
    pub fn display_lines(&self) -> (&str, &str) {
        if self.expression.is_empty() && self.current_input.is_empty() {
            ("", "0")
        } else {
            (&self.expression, &self.current_input)
        }
    }

    pub fn state(&self) -> EngineState {
        if !self.entry_mode {
            EngineState::EnteringOperand
        } else if self.operators.is_empty() {
            EngineState::Idle
        } else {
            EngineState::OperatorPending
        }
    }

    pub fn current_input(&self) -> &str {
        &self.current_input
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn operands(&self) -> &[f64] {
        &self.operands
    }

    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    pub fn is_entry_mode(&self) -> bool {
        self.entry_mode
    }

    fn rebuild_expression(&mut self) {
        let mut parts = Vec::with_capacity(self.operands.len() + self.operators.len());
        for (i, operand) in self.operands.iter().enumerate() {
            parts.push(format_number(*operand));
            if let Some(op) = self.operators.get(i) {
                parts.push(op.to_string());
            }
        }
        self.expression = parts.join(" ");
    }
}
