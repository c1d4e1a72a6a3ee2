//! Per-video hit counting: cushions from the first frame, balls from every frame

use super::source::{FrameSource, VideoFile};
use super::VideoError;
use crate::detection::config::{CollisionConfig, DetectionConfig};
use crate::detection::{BallDetector, EdgeDetector};
use crate::traits::{BallFinder, EdgeFinder};
use crate::utils::FrameAnnotator;
use crate::Result;
use anyhow::Context;
use cushion_core::{count_contacts, Ball, CollisionCounter, TableEdges};
use serde::Serialize;
use std::path::Path;
use std::time::Instant;

/// Result of processing one video
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoOutcome {
    pub hits: u64,
    pub frames: u64,
    pub counted_events: u64,
    pub edges: TableEdges,
    pub processing_time_ms: u64,
}

/// Runs ball and cushion detection over a stream of frames
pub struct VideoProcessor<B = BallDetector, E = EdgeDetector> {
    ball_finder: B,
    edge_finder: E,
    collision: CollisionConfig,
    annotator: Option<FrameAnnotator>,
}

impl VideoProcessor {
    /// Processor backed by the OpenCV detectors
    pub fn from_config(config: &DetectionConfig) -> Self {
        let processor = Self::with_finders(
            BallDetector::new(config.ball.clone()),
            EdgeDetector::new(config.edge.clone()),
            config.collision.clone(),
        );

        if config.visualization.save_first_frame {
            processor.with_annotator(FrameAnnotator::new(config.visualization.clone()))
        } else {
            processor
        }
    }
}

impl<B: BallFinder, E: EdgeFinder> VideoProcessor<B, E> {
    pub fn with_finders(ball_finder: B, edge_finder: E, collision: CollisionConfig) -> Self {
        Self {
            ball_finder,
            edge_finder,
            collision,
            annotator: None,
        }
    }

    pub fn with_annotator(mut self, annotator: FrameAnnotator) -> Self {
        self.annotator = Some(annotator);
        self
    }

    /// Open `path` and count cushion hits in it
    pub fn process_file<P: AsRef<Path>>(&self, path: P) -> Result<VideoOutcome> {
        let mut video = VideoFile::open(&path)?;
        self.process(&mut video)
            .with_context(|| format!("Failed to process video: {:?}", path.as_ref()))
    }

    /// Count cushion hits over every frame of `source`
    ///
    /// Cushions are detected once, on the first frame, and reused for the rest
    /// of the stream. Frames are numbered from 1.
    pub fn process<S: FrameSource>(&self, source: &mut S) -> Result<VideoOutcome> {
        let start_time = Instant::now();
        let name = source.name();

        let first = source
            .next_frame()?
            .ok_or_else(|| VideoError::NoFrames(name.clone()))?;

        let edges = self.edge_finder.find_edges(&first)?;
        tracing::info!(
            video = %name,
            left = edges.left.x(),
            right = edges.right.x(),
            "cushions detected"
        );

        let mut counter = CollisionCounter::new(self.collision.gap_frames);
        let mut frame_no: u64 = 1;

        let balls = self.ball_finder.find_balls(&first)?;
        if let Some(annotator) = &self.annotator {
            annotator.save(&first, &edges, &balls, &name)?;
        }
        self.record_frame(&mut counter, frame_no, &edges, &balls);

        while let Some(frame) = source.next_frame()? {
            frame_no += 1;
            let balls = self.ball_finder.find_balls(&frame)?;
            self.record_frame(&mut counter, frame_no, &edges, &balls);
        }

        let outcome = VideoOutcome {
            hits: counter.total(),
            frames: frame_no,
            counted_events: counter.counted_events(),
            edges,
            processing_time_ms: start_time.elapsed().as_millis() as u64,
        };

        tracing::info!(
            video = %name,
            hits = outcome.hits,
            frames = outcome.frames,
            time_ms = outcome.processing_time_ms,
            "video processed"
        );
        Ok(outcome)
    }

    fn record_frame(
        &self,
        counter: &mut CollisionCounter,
        frame_no: u64,
        edges: &TableEdges,
        balls: &[Ball],
    ) {
        let contacts = count_contacts(edges, balls, self.collision.proximity_px);
        if counter.record(frame_no, contacts) {
            tracing::debug!(frame_no, contacts, total = counter.total(), "cushion hit");
        }
    }
}

#[cfg(feature = "parallel")]
impl<B: BallFinder + Sync, E: EdgeFinder + Sync> VideoProcessor<B, E> {
    /// Process several videos concurrently, one capture per worker
    pub fn process_files<P: AsRef<Path> + Sync>(&self, paths: &[P]) -> Vec<Result<VideoOutcome>> {
        use rayon::prelude::*;

        paths
            .par_iter()
            .map(|path| self.process_file(path))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cushion_core::EdgeLine;
    use opencv::core::{Mat, Point, Rect, Scalar, CV_8UC3};
    use opencv::imgproc;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;

    /// Replays a fixed list of per-frame detections
    struct ScriptedBalls(RefCell<VecDeque<Vec<Ball>>>);

    impl BallFinder for ScriptedBalls {
        fn find_balls(&self, _frame: &Mat) -> Result<Vec<Ball>> {
            Ok(self.0.borrow_mut().pop_front().unwrap_or_default())
        }
    }

    struct FixedEdges {
        edges: TableEdges,
        calls: Cell<usize>,
    }

    impl EdgeFinder for FixedEdges {
        fn find_edges(&self, _frame: &Mat) -> Result<TableEdges> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.edges)
        }
    }

    fn table() -> TableEdges {
        TableEdges {
            left: EdgeLine::new(100, 0, 100, 400),
            right: EdgeLine::new(500, 0, 500, 400),
        }
    }

    fn blank_frames(n: usize) -> VecDeque<Mat> {
        (0..n).map(|_| Mat::default()).collect()
    }

    fn scripted(
        per_frame: Vec<Vec<Ball>>,
        gap_frames: u64,
    ) -> VideoProcessor<ScriptedBalls, FixedEdges> {
        VideoProcessor::with_finders(
            ScriptedBalls(RefCell::new(per_frame.into())),
            FixedEdges {
                edges: table(),
                calls: Cell::new(0),
            },
            CollisionConfig {
                gap_frames,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_empty_source_is_an_error() {
        let processor = scripted(Vec::new(), 2);
        let err = processor.process(&mut blank_frames(0)).unwrap_err();
        assert!(matches!(err.downcast_ref::<VideoError>(), Some(VideoError::NoFrames(_))));
    }

    #[test]
    fn test_cooldown_applies_across_frames() -> Result<()> {
        let near_left = vec![Ball::new(110.0, 50.0, 4.0)];
        let near_both = vec![Ball::new(110.0, 50.0, 4.0), Ball::new(495.0, 80.0, 4.0)];
        let per_frame = vec![
            near_left.clone(),
            near_left.clone(),
            Vec::new(),
            near_both.clone(),
            near_left.clone(),
            Vec::new(),
            Vec::new(),
            near_left,
        ];

        let processor = scripted(per_frame, 2);
        let outcome = processor.process(&mut blank_frames(8))?;

        // frames 1 (1 contact), 4 (2 contacts) and 8 (1 contact) are counted
        assert_eq!(outcome.hits, 4);
        assert_eq!(outcome.counted_events, 3);
        assert_eq!(outcome.frames, 8);
        assert_eq!(outcome.edges, table());
        assert_eq!(processor.edge_finder.calls.get(), 1);
        Ok(())
    }

    #[test]
    fn test_no_contacts_no_hits() -> Result<()> {
        let middle = vec![Ball::new(300.0, 50.0, 4.0)];
        let processor = scripted(vec![middle.clone(), middle], 2);
        let outcome = processor.process(&mut blank_frames(2))?;
        assert_eq!(outcome.hits, 0);
        assert_eq!(outcome.counted_events, 0);
        Ok(())
    }

    fn table_frame(ball_x: Option<i32>) -> Result<Mat> {
        let mut frame = Mat::new_rows_cols_with_default(480, 640, CV_8UC3, Scalar::all(0.0))?;
        for x in [80, 560] {
            imgproc::line(
                &mut frame,
                Point::new(x, 20),
                Point::new(x, 460),
                Scalar::all(255.0),
                3,
                imgproc::LINE_8,
                0,
            )?;
        }
        if let Some(x) = ball_x {
            imgproc::rectangle(
                &mut frame,
                Rect::new(x, 200, 6, 6),
                Scalar::all(255.0),
                imgproc::FILLED,
                imgproc::LINE_8,
                0,
            )?;
        }
        Ok(frame)
    }

    #[test]
    fn test_synthetic_video_with_opencv_detectors() -> Result<()> {
        let mut frames = VecDeque::new();
        for ball_x in [Some(92), Some(92), None, Some(300), Some(92), Some(92)] {
            frames.push_back(table_frame(ball_x)?);
        }

        let processor = VideoProcessor::from_config(&DetectionConfig::default());
        let outcome = processor.process(&mut frames)?;

        assert!((75..=85).contains(&outcome.edges.left.x()));
        assert!((555..=565).contains(&outcome.edges.right.x()));
        assert_eq!(outcome.frames, 6);
        assert_eq!(outcome.hits, 2);
        Ok(())
    }

    #[test]
    fn test_process_file_counts_frames_and_hits() -> Result<()> {
        let path = crate::video::test_video::temp_video_path("processor");
        crate::video::test_video::write_video(&path, 5)?;

        let near_left = vec![Ball::new(110.0, 50.0, 4.0)];
        let processor = scripted(
            vec![near_left.clone(), near_left.clone(), Vec::new(), Vec::new(), near_left],
            2,
        );
        let outcome = processor.process_file(&path);
        std::fs::remove_file(&path)?;
        let outcome = outcome?;

        // frame 2 falls inside the cooldown of frame 1; frame 5 does not
        assert_eq!(outcome.frames, 5);
        assert_eq!(outcome.hits, 2);
        assert_eq!(outcome.counted_events, 2);
        Ok(())
    }

    #[test]
    fn test_first_frame_annotation_is_saved() -> Result<()> {
        let dir = std::env::temp_dir().join(format!("cushion-processor-{}", std::process::id()));
        let config = DetectionConfig::default().with_annotations(&dir);

        let mut frames = vec![table_frame(Some(92))?, table_frame(None)?];
        let outcome = VideoProcessor::from_config(&config).process(&mut frames)?;

        let annotated = dir.join("frames_annotated.png");
        let saved = annotated.exists();
        std::fs::remove_dir_all(&dir)?;

        assert!(saved);
        assert_eq!(outcome.frames, 2);
        Ok(())
    }
}
