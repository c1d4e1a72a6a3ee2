use crate::geometry::{Ball, TableEdges};

/// Count ball/cushion contacts in a single frame.
///
/// Only x coordinates are compared. Each ball adds one contact per edge it is
/// within `proximity` pixels of, so a ball that has crossed an edge still
/// counts and a ball close to both edges counts twice.
pub fn count_contacts(edges: &TableEdges, balls: &[Ball], proximity: f32) -> u32 {
    let left_x = edges.left.x() as f32;
    let right_x = edges.right.x() as f32;

    balls
        .iter()
        .map(|ball| {
            let mut contacts = 0;
            if ball.x - left_x <= proximity {
                contacts += 1;
            }
            if right_x - ball.x <= proximity {
                contacts += 1;
            }
            contacts
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::EdgeLine;

    fn table() -> TableEdges {
        TableEdges {
            left: EdgeLine::new(100, 0, 100, 400),
            right: EdgeLine::new(500, 0, 500, 400),
        }
    }

    #[test]
    fn test_ball_in_the_middle_has_no_contact() {
        let balls = [Ball::new(300.0, 200.0, 4.0)];
        assert_eq!(count_contacts(&table(), &balls, 20.0), 0);
    }

    #[test]
    fn test_proximity_is_inclusive() {
        let balls = [Ball::new(120.0, 50.0, 4.0), Ball::new(480.0, 50.0, 4.0)];
        assert_eq!(count_contacts(&table(), &balls, 20.0), 2);

        let balls = [Ball::new(120.5, 50.0, 4.0)];
        assert_eq!(count_contacts(&table(), &balls, 20.0), 0);
    }

    #[test]
    fn test_ball_past_edge_counts() {
        let balls = [Ball::new(60.0, 10.0, 4.0), Ball::new(610.0, 10.0, 4.0)];
        assert_eq!(count_contacts(&table(), &balls, 20.0), 2);
    }

    #[test]
    fn test_narrow_table_counts_both_edges() {
        let edges = TableEdges {
            left: EdgeLine::vertical_at(100),
            right: EdgeLine::vertical_at(130),
        };
        let balls = [Ball::new(115.0, 0.0, 4.0)];
        assert_eq!(count_contacts(&edges, &balls, 20.0), 2);
    }

    #[test]
    fn test_fallback_edges_hit_everything_between() {
        // With the placeholder edges swapped, every ball in 240..=700 is "beyond" both.
        let balls = [Ball::new(400.0, 0.0, 4.0), Ball::new(10.0, 0.0, 4.0)];
        assert_eq!(count_contacts(&TableEdges::default(), &balls, 20.0), 3);
    }
}
