use std::{fmt::Display, str::FromStr};

/// The four search strategies. A strategy fixes both the frontier discipline
/// and the priority formula for a whole run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    Depth,
    Breadth,
    Best,
    Astar,
}

/// How new nodes enter the frontier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Discipline {
    /// Newest node is popped first.
    Lifo,
    /// Oldest node is popped first.
    Fifo,
    /// Lowest `(f, h)` is popped first.
    Ordered,
}

/// How A* combines path cost and heuristic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AStarBlend {
    /// `g + h`
    Sum,
    /// `g + h / 2` with integer division, as the integer puzzle orders its
    /// frontier.
    HalfHeuristic,
}

impl AStarBlend {
    pub fn combine(self, g: u64, h: u64) -> u64 {
        match self {
            AStarBlend::Sum => g.saturating_add(h),
            AStarBlend::HalfHeuristic => g.saturating_add(h / 2),
        }
    }
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Depth,
        Strategy::Breadth,
        Strategy::Best,
        Strategy::Astar,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Depth => "depth",
            Strategy::Breadth => "breadth",
            Strategy::Best => "best",
            Strategy::Astar => "astar",
        }
    }

    pub fn discipline(self) -> Discipline {
        match self {
            Strategy::Depth => Discipline::Lifo,
            Strategy::Breadth => Discipline::Fifo,
            Strategy::Best | Strategy::Astar => Discipline::Ordered,
        }
    }

    /// The `f` value a node gets under this strategy.
    pub fn priority(self, g: u64, h: u64, blend: AStarBlend) -> u64 {
        match self {
            Strategy::Depth | Strategy::Breadth => 0,
            Strategy::Best => h,
            Strategy::Astar => blend.combine(g, h),
        }
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown strategy `{0}` (expected breadth, depth, best or astar)")]
pub struct ParseStrategyError(String);

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.name() == s)
            .ok_or_else(|| ParseStrategyError(s.to_string()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_the_four_names() {
        assert_eq!("depth".parse(), Ok(Strategy::Depth));
        assert_eq!("breadth".parse(), Ok(Strategy::Breadth));
        assert_eq!("best".parse(), Ok(Strategy::Best));
        assert_eq!("astar".parse(), Ok(Strategy::Astar));
    }

    #[test]
    fn rejects_unknown_names() {
        let err = "dijkstra".parse::<Strategy>().unwrap_err();
        assert!(err.to_string().contains("dijkstra"));
        assert!("Depth".parse::<Strategy>().is_err());
    }

    #[test]
    fn display_matches_parse() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.to_string().parse(), Ok(strategy));
        }
    }

    #[test]
    fn priority_per_strategy() {
        assert_eq!(Strategy::Depth.priority(7, 5, AStarBlend::Sum), 0);
        assert_eq!(Strategy::Breadth.priority(7, 5, AStarBlend::Sum), 0);
        assert_eq!(Strategy::Best.priority(7, 5, AStarBlend::Sum), 5);
        assert_eq!(Strategy::Astar.priority(7, 5, AStarBlend::Sum), 12);
        assert_eq!(Strategy::Astar.priority(7, 5, AStarBlend::HalfHeuristic), 9);
    }

    #[test]
    fn disciplines() {
        assert_eq!(Strategy::Depth.discipline(), Discipline::Lifo);
        assert_eq!(Strategy::Breadth.discipline(), Discipline::Fifo);
        assert_eq!(Strategy::Best.discipline(), Discipline::Ordered);
        assert_eq!(Strategy::Astar.discipline(), Discipline::Ordered);
    }

    #[test]
    fn blend_saturates() {
        assert_eq!(AStarBlend::Sum.combine(u64::MAX, 1), u64::MAX);
    }
}
