//! Star-name canonicalisation and matching.
//!
//! Pipeline for [`normalize`]:
//!   raw name
//!     └─ lowercase, collapse whitespace
//!          └─ standardize_prefix()   → at most one catalog prefix rewrite
//!               └─ substitute_greek() → Bayer abbreviations
//!                    └─ strip_designation() → drop one trailing component tag

use std::collections::{HashMap, HashSet, hash_map::Entry};

// ─── Tables ──────────────────────────────────────────────────────────────────

/// Catalog prefixes in match order: `(spelling, canonical)`. Longer spellings
/// sharing a stem come first so `gliese` is not read as `gl` + `iese`.
const CATALOG_PREFIXES: &[(&str, &str)] = &[
  ("hd", "hd"),
  ("gliese", "gj"),
  ("gj", "gj"),
  ("gl", "gj"),
  ("hr", "hr"),
  ("hip", "hip"),
  ("bd", "bd"),
  ("wolf", "wolf"),
  ("lhs", "lhs"),
  ("2mass", "2mass"),
];

/// Greek letter spell-outs and their Bayer abbreviations.
const GREEK_LETTERS: [(&str, &str); 24] = [
  ("alpha", "alf"),
  ("beta", "bet"),
  ("gamma", "gam"),
  ("delta", "del"),
  ("epsilon", "eps"),
  ("zeta", "zet"),
  ("eta", "eta"),
  ("theta", "tet"),
  ("iota", "iot"),
  ("kappa", "kap"),
  ("lambda", "lam"),
  ("mu", "mu"),
  ("nu", "nu"),
  ("xi", "ksi"),
  ("omicron", "omi"),
  ("pi", "pi"),
  ("rho", "rho"),
  ("sigma", "sig"),
  ("tau", "tau"),
  ("upsilon", "ups"),
  ("phi", "phi"),
  ("chi", "chi"),
  ("psi", "psi"),
  ("omega", "ome"),
];

// ─── Normalisation ───────────────────────────────────────────────────────────

fn collapse(raw: &str) -> String {
  raw
    .split_whitespace()
    .collect::<Vec<_>>()
    .join(" ")
    .to_lowercase()
}

/// Rewrite a leading catalog prefix to `<canonical> <rest>`. Only the first
/// matching table entry applies, and only once.
fn standardize_prefix(name: &str) -> String {
  for (spelling, canonical) in CATALOG_PREFIXES {
    let Some(rest) = name.strip_prefix(*spelling) else {
      continue;
    };
    // `hd189733`, `hd 189733`, `bd+20 2457` match; `hdx` and `hd` alone don't.
    match rest.chars().next() {
      Some(c) if !c.is_ascii_alphabetic() => {
        let rest = rest.trim_start();
        if rest.is_empty() {
          return name.to_string();
        }
        return format!("{canonical} {rest}");
      }
      _ => continue,
    }
  }
  name.to_string()
}

fn substitute_greek(name: &str) -> String {
  name
    .split(' ')
    .map(|word| {
      GREEK_LETTERS
        .iter()
        .find(|(full, _)| *full == word)
        .map_or(word, |(_, abbrev)| *abbrev)
    })
    .collect::<Vec<_>>()
    .join(" ")
}

fn is_designation(token: &str) -> bool {
  matches!(token, "a" | "b" | "1" | "2")
    || (token.len() <= 4 && token.chars().all(|c| matches!(c, 'i' | 'v' | 'x')))
}

fn is_bare_prefix(name: &str) -> bool {
  CATALOG_PREFIXES.iter().any(|(_, canonical)| *canonical == name)
}

/// Drop one trailing component/planet designation (`a`, `b`, `1`, `2`, or a
/// roman-numeral-like token), unless that would leave only a catalog prefix.
fn strip_designation(name: &str) -> String {
  if let Some((head, last)) = name.rsplit_once(' ')
    && is_designation(last)
    && !head.is_empty()
    && !is_bare_prefix(head)
  {
    return head.to_string();
  }
  name.to_string()
}

/// Canonical comparison form of a star name.
pub fn normalize(raw: &str) -> String {
  let name = collapse(raw);
  let name = standardize_prefix(&name);
  let name = substitute_greek(&name);
  strip_designation(&name)
}

/// Comparison key for planet names: like [`normalize`] but keeping the
/// trailing designation (`b` vs `c` matters for planets), with spaces and
/// hyphens removed.
pub fn planet_key(raw: &str) -> String {
  let name = collapse(raw);
  let name = standardize_prefix(&name);
  substitute_greek(&name)
    .chars()
    .filter(|c| *c != ' ' && *c != '-')
    .collect()
}

/// Whether two planet names denote the same planet.
pub fn planets_match(a: &str, b: &str) -> bool { planet_key(a) == planet_key(b) }

/// The name, its normalised form, and the usual alternate spellings of its
/// catalog prefix.
pub fn variants(name: &str) -> Vec<String> {
  let normalized = normalize(name);
  let mut out = vec![name.to_string(), normalized.clone()];

  let spellings: &[&str] = match normalized.split_once(' ') {
    Some(("hd", _)) => &["HD"],
    Some(("gj", _)) => &["GJ", "Gliese", "GL"],
    Some(("hr", _)) => &["HR"],
    Some(("hip", _)) => &["HIP"],
    Some(("bd", _)) => &["BD"],
    Some(("wolf", _)) => &["Wolf"],
    Some(("lhs", _)) => &["LHS"],
    Some(("2mass", _)) => &["2MASS"],
    _ => &[],
  };
  if let Some((_, rest)) = normalized.split_once(' ') {
    let rest = rest.to_uppercase();
    for prefix in spellings {
      out.push(format!("{prefix}{rest}"));
      out.push(format!("{prefix} {rest}"));
    }
  }

  let mut seen = HashSet::new();
  out.retain(|v| seen.insert(v.clone()));
  out
}

// ─── Matcher ─────────────────────────────────────────────────────────────────

/// Memoising star-name similarity predicate.
///
/// Owned by one fusion run; entries are pure functions of their inputs and
/// are never invalidated.
#[derive(Debug, Default)]
pub struct NameMatcher {
  normalized: HashMap<String, String>,
  similar:    HashMap<(String, String), bool>,
}

impl NameMatcher {
  pub fn new() -> Self { Self::default() }

  fn normalized(&mut self, name: &str) -> String {
    if let Some(n) = self.normalized.get(name) {
      return n.clone();
    }
    let n = normalize(name);
    self.normalized.insert(name.to_string(), n.clone());
    n
  }

  /// True iff the normalised names are equal or one contains the other.
  pub fn are_similar(&mut self, a: &str, b: &str) -> bool {
    let key = (a.to_string(), b.to_string());
    if let Some(hit) = self.similar.get(&key) {
      return *hit;
    }
    let na = self.normalized(a);
    let nb = self.normalized(b);
    let similar = !na.is_empty()
      && !nb.is_empty()
      && (na == nb || na.contains(&nb) || nb.contains(&na));
    self.similar.insert(key, similar);
    similar
  }

  /// Number of memoised pairs.
  pub fn cached_pairs(&self) -> usize { self.similar.len() }
}

// ─── Registry ────────────────────────────────────────────────────────────────

/// Maps every observed spelling of a star to one canonical primary name.
///
/// Built and discarded within a single fusion run. The first registration of
/// a spelling wins.
#[derive(Debug, Default)]
pub struct NameRegistry {
  by_normalized: HashMap<String, String>,
  by_variant:    HashMap<String, String>,
  /// `(variant, primary)` in registration order, for the similarity scan.
  scan:          Vec<(String, String)>,
}

impl NameRegistry {
  pub fn new() -> Self { Self::default() }

  /// Register `primary` and its `alternates` as spellings of `primary`.
  pub fn register(&mut self, primary: &str, alternates: &[String]) {
    let names = std::iter::once(primary).chain(alternates.iter().map(String::as_str));
    for name in names {
      self
        .by_normalized
        .entry(normalize(name))
        .or_insert_with(|| primary.to_string());
      for variant in variants(name) {
        if let Entry::Vacant(slot) = self.by_variant.entry(variant.clone()) {
          slot.insert(primary.to_string());
          self.scan.push((variant, primary.to_string()));
        }
      }
    }
  }

  /// Resolve `name` to a registered primary name: exact normalised match,
  /// then a known variant, then a linear similarity scan.
  pub fn resolve(&self, matcher: &mut NameMatcher, name: &str) -> Option<&str> {
    self.lookup(name).or_else(|| self.scan(matcher, name))
  }

  /// Exact normalised match, then a known variant. No similarity scan.
  pub fn lookup(&self, name: &str) -> Option<&str> {
    if let Some(primary) = self.by_normalized.get(&normalize(name)) {
      return Some(primary.as_str());
    }
    variants(name)
      .iter()
      .find_map(|v| self.by_variant.get(v))
      .map(String::as_str)
  }

  /// First registered variant similar to `name`, in registration order.
  pub fn scan(&self, matcher: &mut NameMatcher, name: &str) -> Option<&str> {
    self
      .scan
      .iter()
      .find(|(variant, _)| matcher.are_similar(name, variant))
      .map(|(_, primary)| primary.as_str())
  }

  pub fn len(&self) -> usize { self.scan.len() }

  pub fn is_empty(&self) -> bool { self.scan.is_empty() }
}
