//! Focus Stacking Testing
//!
//! End-to-end behavior of the stacking engine:
//! - Winner selection on controlled sharpness
//! - Tie-breaking in favor of later images
//! - Depth ramp and depth map rendering
//! - Output bounds and determinism

use focusstack::focus_stack::NO_DATA;
use focusstack::plane::{Plane, Rect};
use focusstack::testing::{checkerboard, solid_frame, split_focus_pair, with_marked_pixel};
use focusstack::{FocusStack, StackConfig};
use image::{DynamicImage, GenericImageView, Rgb, Rgba};

const BACKGROUND: [u8; 3] = [100, 100, 100];

/// Three 4x4 gray frames, each with one colored pixel at its own interior coordinate.
///
/// Lumas of the marks are 169, 34 and 189 against a background of 100, chosen so
/// each frame is clearly the sharpest at its own mark.
fn marked_frames() -> Vec<((u32, u32), [u8; 3], DynamicImage)> {
    let base = solid_frame(4, 4, BACKGROUND);
    [
        ((1, 1), [220, 150, 130]),
        ((2, 1), [30, 40, 20]),
        ((1, 2), [150, 200, 230]),
    ]
    .into_iter()
    .map(|((x, y), color)| ((x, y), color, with_marked_pixel(&base, x, y, color)))
    .collect()
}

fn stack_all(frames: &[DynamicImage]) -> FocusStack {
    let mut stack = FocusStack::for_image(&frames[0], &StackConfig::default())
        .expect("stack creation should succeed");
    for frame in frames {
        stack.add_dynamic(frame).expect("adding a frame should succeed");
    }
    stack
}

#[test]
fn test_marked_pixels_come_from_sharpest_frame() {
    let frames = marked_frames();
    let images: Vec<_> = frames.iter().map(|(_, _, img)| img.clone()).collect();
    let stack = stack_all(&images);

    for (i, ((x, y), color, _)) in frames.iter().enumerate() {
        let (x, y) = (*x as i32, *y as i32);
        assert_eq!(
            stack.source_index().at(x, y),
            i + 1,
            "mark of frame {} should win at ({}, {})",
            i + 1,
            x,
            y
        );
        assert_eq!(stack.stacked_image().get_pixel(x as u32, y as u32), &Rgb(*color));
    }
}

#[test]
fn test_depth_map_shows_three_levels_in_stack_order() {
    let frames = marked_frames();
    let images: Vec<_> = frames.iter().map(|(_, _, img)| img.clone()).collect();
    let stack = stack_all(&images);

    let lut = stack.ordered_depths().expect("three frames were added");
    assert_eq!(lut.get(1), Some(43690));
    assert_eq!(lut.get(2), Some(21845));
    assert_eq!(lut.get(3), Some(255));

    let depth = stack.depth_map(&lut).unwrap();
    let levels: Vec<u16> = frames
        .iter()
        .map(|((x, y), _, _)| depth.get_pixel(*x, *y)[0])
        .collect();
    assert_eq!(levels, vec![43690, 21845, 255]);
    assert!(levels[0] > levels[1] && levels[1] > levels[2]);
}

#[test]
fn test_single_frame_claims_every_pixel() {
    let stack = stack_all(&[checkerboard(9, 7, 2)]);
    assert!(stack.source_index().iter().all(|(_, _, src)| src == 1));
    assert!(stack.source_index().iter().all(|(_, _, src)| src != NO_DATA));
}

#[test]
fn test_identical_frames_tie_to_the_later_one() {
    let frame = checkerboard(10, 6, 3);
    let stack = stack_all(&[frame.clone(), frame]);
    assert!(stack.source_index().iter().all(|(_, _, src)| src == 2));
}

#[test]
fn test_split_focus_picks_sharp_half() {
    let (left_sharp, right_sharp) = split_focus_pair(32, 16);
    let stack = stack_all(&[left_sharp, right_sharp]);

    for y in 5..=10 {
        for x in 5..=12 {
            assert_eq!(stack.source_index().at(x, y), 1, "left half at ({}, {})", x, y);
        }
        for x in 19..=26 {
            assert_eq!(stack.source_index().at(x, y), 2, "right half at ({}, {})", x, y);
        }
    }
}

#[test]
fn test_output_bounds_follow_first_frame() {
    let first = solid_frame(6, 4, BACKGROUND);
    let bigger = checkerboard(12, 9, 2);
    let smaller = checkerboard(3, 2, 1);
    let stack = stack_all(&[first, bigger, smaller]);

    assert_eq!(stack.bounds(), Rect::new(0, 0, 5, 3));
    assert_eq!(stack.stacked_image().dimensions(), (6, 4));
    let lut = stack.ordered_depths().unwrap();
    assert_eq!(stack.depth_map(&lut).unwrap().dimensions(), (6, 4));
}

#[test]
fn test_stacking_is_deterministic() {
    let frames: Vec<_> = marked_frames().into_iter().map(|(_, _, img)| img).collect();
    let a = stack_all(&frames);
    let b = stack_all(&frames);

    assert_eq!(a.stacked_image(), b.stacked_image());
    assert_eq!(a.source_index(), b.source_index());
    assert_eq!(a.max_sharpness(), b.max_sharpness());
    let lut = a.ordered_depths().unwrap();
    assert_eq!(a.depth_map(&lut).unwrap(), b.depth_map(&lut).unwrap());
}

#[test]
fn test_empty_stack_has_no_depths() {
    let stack = FocusStack::new(Rect::new(0, 0, 3, 3)).unwrap();
    assert!(stack.ordered_depths().is_none());
    assert_eq!(stack.num_images(), 0);
}

/// Plane with a non-zero origin, to exercise rebasing inside the engine.
struct Offset<'a> {
    frame: &'a DynamicImage,
    dx: i32,
    dy: i32,
}

impl Plane<Rgba<u16>> for Offset<'_> {
    fn at(&self, x: i32, y: i32) -> Rgba<u16> {
        focusstack::RasterPlane::new(self.frame).at(x - self.dx, y - self.dy)
    }

    fn bounds(&self) -> Rect {
        let (w, h) = (self.frame.width() as i32, self.frame.height() as i32);
        Rect::new(self.dx, self.dy, self.dx + w - 1, self.dy + h - 1)
    }
}

#[test]
fn test_offset_planes_are_rebased() {
    let frame = with_marked_pixel(&solid_frame(4, 4, BACKGROUND), 2, 2, [250, 250, 250]);
    let plane = Offset {
        frame: &frame,
        dx: 10,
        dy: 20,
    };

    let mut stack = FocusStack::new(plane.bounds()).unwrap();
    stack.add_image(&plane).unwrap();

    assert_eq!(stack.bounds(), Rect::new(10, 20, 13, 23));
    assert_eq!(stack.stacked_image(), &frame.to_rgb8());
    assert!(stack.source_index().iter().all(|(_, _, src)| src == 1));
}

#[test]
fn test_custom_kernel_size_is_made_odd() {
    let config = StackConfig {
        kernel_size: 6,
        sigma: 1.0,
    };
    let stack = FocusStack::with_config(Rect::new(0, 0, 7, 7), &config).unwrap();
    assert_eq!((stack.kernel().width(), stack.kernel().height()), (7, 7));
}
