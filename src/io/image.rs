//! Maze raster loading and PNG export of solve results

use crate::algorithm::session::MazeSession;
use crate::io::configuration::{
    AGENT_COLOR, ENTRANCE_COLOR, EXIT_COLOR, MARKER_RADIUS, TRUNK_COLOR, VISITED_COLOR,
};
use crate::io::error::{MazeError, Result};
use crate::spatial::{Cell, Raster};
use image::{Rgba, RgbaImage};
use ndarray::Array2;
use std::path::Path;

/// Load a maze image as an RGBA raster
///
/// # Errors
///
/// Returns an error if:
/// - The file at the given path cannot be opened or read
/// - The file is not a valid image format
pub fn load_raster(path: &Path) -> Result<Raster> {
    let img = image::open(path).map_err(|e| MazeError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(raster_from_image(&img.to_rgba8()))
}

/// Copy an in-memory RGBA image into a raster
pub fn raster_from_image(img: &RgbaImage) -> Raster {
    let (width, height) = (img.width() as usize, img.height() as usize);
    let mut pixels = Array2::from_elem((height, width), [0u8; 4]);
    for (x, y, pixel) in img.enumerate_pixels() {
        if let Some(slot) = pixels.get_mut((y as usize, x as usize)) {
            *slot = pixel.0;
        }
    }
    Raster::from_array(pixels)
}

/// Render a raster back into an RGBA image
pub fn raster_to_image(raster: &Raster) -> RgbaImage {
    let mut img = RgbaImage::new(raster.width() as u32, raster.height() as u32);
    for ((row, col), color) in raster.pixels().indexed_iter() {
        img.put_pixel(col as u32, row as u32, Rgba(*color));
    }
    img
}

/// Fill a square of half edge `radius` around `center`, clipped to the image
pub fn fill_square(img: &mut RgbaImage, center: Cell, radius: i32, color: [u8; 4]) {
    for y in center.y - radius..=center.y + radius {
        for x in center.x - radius..=center.x + radius {
            put_clipped(img, x, y, color);
        }
    }
}

/// Draw the outline of a `size` footprint anchored at `anchor`
pub fn outline_box(img: &mut RgbaImage, anchor: Cell, size: i32, color: [u8; 4]) {
    for offset in 0..=size {
        put_clipped(img, anchor.x + offset, anchor.y, color);
        put_clipped(img, anchor.x + offset, anchor.y + size, color);
        put_clipped(img, anchor.x, anchor.y + offset, color);
        put_clipped(img, anchor.x + size, anchor.y + offset, color);
    }
}

fn put_clipped(img: &mut RgbaImage, x: i32, y: i32, color: [u8; 4]) {
    let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
        return;
    };
    if let Some(pixel) = img.get_pixel_mut_checked(x, y) {
        *pixel = Rgba(color);
    }
}

/// Centre of a footprint anchored at `cell`
pub const fn footprint_centre(cell: Cell, size: i32) -> Cell {
    cell.offset(size / 2, size / 2)
}

/// Maze with visited cells, the current trunk, both openings and the agent drawn on top
pub fn render_session(session: &MazeSession) -> RgbaImage {
    let mut img = raster_to_image(session.footprint().free_space().raster());
    let size = session.footprint().size();

    if let Some(visited) = session.navigator().visited() {
        for cell in visited.cells() {
            fill_square(&mut img, footprint_centre(cell, size), 1, VISITED_COLOR);
        }
    }
    for &cell in session.navigator().path() {
        fill_square(&mut img, footprint_centre(cell, size), 1, TRUNK_COLOR);
    }

    fill_square(&mut img, session.entrance(), MARKER_RADIUS, ENTRANCE_COLOR);
    fill_square(&mut img, session.exit(), MARKER_RADIUS, EXIT_COLOR);
    outline_box(&mut img, session.pose(), size, AGENT_COLOR);
    img
}

/// Export the rendered session as a PNG image
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_solution_png(session: &MazeSession, output_path: &Path) -> Result<()> {
    let img = render_session(session);

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| MazeError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path).map_err(|e| MazeError::ImageExport {
        path: output_path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
