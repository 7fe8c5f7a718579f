//! Tracing infrastructure for debugging grammar compilation.
//!
//! Same shape as the lexer's: a `CompileTracer` trait, a `NoopTracer`
//! whose methods compile away, and a `PrintTracer` collecting lines.

use syntaxis_core::{KindTable, RankedType, RankedTypeId, Rule, RuleId, TokenTable};

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Ranked types, list loops and fixed-point summaries.
    #[default]
    Default,
    /// Also every compiled rule.
    Verbose,
}

/// Compiler instrumentation.
pub trait CompileTracer {
    /// Called when a ranked type gets its id.
    fn trace_ranked_type(&mut self, ranked: RankedType, id: RankedTypeId);

    /// Called for every rule once its steps are known.
    fn trace_rule(&mut self, rule: &Rule);

    /// Called when a list loop pair is created.
    fn trace_loop(&mut self, ranked: RankedType, end: RuleId, repeat: RuleId);

    /// Called when a fixed-point pass settles.
    fn trace_fixpoint(&mut self, pass: &'static str, updates: usize);
}

/// No-op tracer that gets optimized away completely.
pub struct NoopTracer;

impl CompileTracer for NoopTracer {
    #[inline(always)]
    fn trace_ranked_type(&mut self, _ranked: RankedType, _id: RankedTypeId) {}

    #[inline(always)]
    fn trace_rule(&mut self, _rule: &Rule) {}

    #[inline(always)]
    fn trace_loop(&mut self, _ranked: RankedType, _end: RuleId, _repeat: RuleId) {}

    #[inline(always)]
    fn trace_fixpoint(&mut self, _pass: &'static str, _updates: usize) {}
}

/// Tracer collecting human-readable lines.
pub struct PrintTracer {
    kinds: Vec<String>,
    tokens: Vec<String>,
    verbosity: Verbosity,
    lines: Vec<String>,
}

impl PrintTracer {
    pub fn new(tokens: &TokenTable, kinds: &KindTable, verbosity: Verbosity) -> Self {
        Self {
            kinds: kinds.iter().map(|(_, name)| name.to_owned()).collect(),
            tokens: tokens.names(),
            verbosity,
            lines: Vec::new(),
        }
    }

    fn kind(&self, ranked: RankedType) -> String {
        let name = self.kinds.get(ranked.kind.index()).map_or("?", |s| s.as_str());
        format!("{name}({})", ranked.rank)
    }

    fn source(&self, id: u32, terminal: bool) -> String {
        if terminal {
            return self.tokens.get(id as usize).cloned().unwrap_or_else(|| "?".to_owned());
        }
        format!("#{id}")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// All lines, newline-terminated.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    /// Print the trace to stderr.
    pub fn print(&self) {
        for line in &self.lines {
            eprintln!("{line}");
        }
    }
}

impl CompileTracer for PrintTracer {
    fn trace_ranked_type(&mut self, ranked: RankedType, id: RankedTypeId) {
        let line = format!("type  {id} = {}", self.kind(ranked));
        self.lines.push(line);
    }

    fn trace_rule(&mut self, rule: &Rule) {
        if self.verbosity != Verbosity::Verbose {
            return;
        }
        let steps: Vec<_> = rule
            .steps()
            .iter()
            .map(|step| {
                let sources: Vec<_> = step
                    .sources()
                    .iter()
                    .map(|&s| self.source(s, step.is_terminal()))
                    .collect();
                sources.join("|")
            })
            .collect();
        let label = rule.action().unwrap_or("*");
        let line = format!(
            "rule  #{} {label} : {} -> {}",
            rule.id(),
            self.kind(rule.ranked()),
            steps.join(" ")
        );
        self.lines.push(line.trim_end().to_owned());
    }

    fn trace_loop(&mut self, ranked: RankedType, end: RuleId, repeat: RuleId) {
        let line = format!("loop  {} end #{end} repeat #{repeat}", self.kind(ranked));
        self.lines.push(line);
    }

    fn trace_fixpoint(&mut self, pass: &'static str, updates: usize) {
        self.lines.push(format!("fix   {pass} after {updates} updates"));
    }
}
