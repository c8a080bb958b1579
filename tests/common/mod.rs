//! 集成测试共用的内存文档。
#![allow(dead_code)]

use std::collections::HashMap;

use image::{GrayImage, Luma, Rgba, RgbaImage};
use sprite_clipboard::clipboard::{Clipboard, ClipboardConfig};
use sprite_clipboard::doc::{
    Cel, ColorMode, DocumentReader, DocumentWriter, FloatingPaste, Image, LayerId, Mask, Palette,
    Point, Size,
};
use sprite_clipboard::error::ClipboardError;
use sprite_clipboard::native::TextClipboard;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// 不连接系统剪贴板的实例。
pub fn headless(config: ClipboardConfig) -> Clipboard {
    init_logger();
    Clipboard::with_text_clipboard(config, TextClipboard::in_memory())
}

/// 最简单的文档实现：所有写入都记录在内存里，便于断言。
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    pub color_mode: ColorMode,
    pub canvas: Size,
    pub transparent_index: u8,
    /// 由下到上，附带可见性
    pub layers: Vec<(LayerId, bool)>,
    pub frame_count: usize,
    pub cels: HashMap<(LayerId, usize), Cel>,
    pub selection: Option<Mask>,
    pub palette: Palette,
    pub active_layer: Option<LayerId>,
    pub active_frame: usize,
    pub floating: Vec<FloatingPaste>,
    /// 每次写入入口被调用时加一
    pub mutations: usize,
    next_layer: u32,
}

impl MemoryDocument {
    pub fn new(color_mode: ColorMode, canvas: Size, layers: usize, frames: usize) -> Self {
        let layers: Vec<(LayerId, bool)> =
            (0..layers as u32).map(|id| (LayerId(id), true)).collect();
        Self {
            color_mode,
            canvas,
            transparent_index: 0,
            active_layer: layers.first().map(|(id, _)| *id),
            next_layer: layers.len() as u32,
            layers,
            frame_count: frames,
            cels: HashMap::new(),
            selection: None,
            palette: Palette::default(),
            active_frame: 0,
            floating: Vec::new(),
            mutations: 0,
        }
    }

    pub fn rgb(width: u32, height: u32, layers: usize, frames: usize) -> Self {
        Self::new(ColorMode::Rgb, Size::new(width, height), layers, frames)
    }

    pub fn indexed(
        width: u32,
        height: u32,
        layers: usize,
        frames: usize,
        palette: Palette,
    ) -> Self {
        let mut doc = Self::new(ColorMode::Indexed, Size::new(width, height), layers, frames);
        doc.palette = palette;
        doc
    }

    pub fn layer(&self, index: usize) -> LayerId {
        self.layers[index].0
    }

    pub fn put_cel(&mut self, layer: usize, frame: usize, position: Point, image: Image) {
        let id = self.layer(layer);
        self.cels.insert((id, frame), Cel::new(position, image));
    }

    pub fn set_visible(&mut self, layer: usize, visible: bool) {
        self.layers[layer].1 = visible;
    }
}

impl DocumentReader for MemoryDocument {
    fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    fn canvas_size(&self) -> Size {
        self.canvas
    }

    fn transparent_index(&self) -> u8 {
        self.transparent_index
    }

    fn layers(&self) -> Vec<LayerId> {
        self.layers.iter().map(|(id, _)| *id).collect()
    }

    fn frame_count(&self) -> usize {
        self.frame_count
    }

    fn active_layer(&self) -> Option<LayerId> {
        self.active_layer
    }

    fn active_frame(&self) -> usize {
        self.active_frame
    }

    fn is_layer_visible(&self, layer: LayerId) -> bool {
        self.layers
            .iter()
            .any(|(id, visible)| *id == layer && *visible)
    }

    fn cel(&self, layer: LayerId, frame: usize) -> Option<&Cel> {
        self.cels.get(&(layer, frame))
    }

    fn selection(&self) -> Option<&Mask> {
        self.selection.as_ref()
    }

    fn palette(&self) -> &Palette {
        &self.palette
    }
}

impl DocumentWriter for MemoryDocument {
    fn clear_region(
        &mut self,
        layer: LayerId,
        frame: usize,
        region: Option<&Mask>,
    ) -> Result<(), ClipboardError> {
        self.mutations += 1;
        let transparent_index = self.transparent_index;
        let Some(region) = region else {
            self.cels.remove(&(layer, frame));
            return Ok(());
        };
        if let Some(cel) = self.cels.get_mut(&(layer, frame)) {
            let (width, height) = (cel.image.width(), cel.image.height());
            for y in 0..height {
                for x in 0..width {
                    let canvas_x = cel.position.x as i64 + x as i64;
                    let canvas_y = cel.position.y as i64 + y as i64;
                    if region.is_selected(canvas_x, canvas_y) {
                        cel.image.clear_pixel(x, y, transparent_index);
                    }
                }
            }
        }
        Ok(())
    }

    fn insert_floating(&mut self, paste: FloatingPaste) -> Result<(), ClipboardError> {
        self.mutations += 1;
        self.floating.push(paste);
        Ok(())
    }

    fn set_cel(
        &mut self,
        layer: LayerId,
        frame: usize,
        cel: Option<Cel>,
    ) -> Result<(), ClipboardError> {
        self.mutations += 1;
        if frame >= self.frame_count {
            return Err(ClipboardError::Document(format!("帧 {} 不存在", frame)));
        }
        match cel {
            Some(cel) => {
                self.cels.insert((layer, frame), cel);
            }
            None => {
                self.cels.remove(&(layer, frame));
            }
        }
        Ok(())
    }

    fn add_layer(&mut self) -> Result<LayerId, ClipboardError> {
        self.mutations += 1;
        let id = LayerId(self.next_layer);
        self.next_layer += 1;
        self.layers.push((id, true));
        Ok(id)
    }

    fn insert_frame(&mut self, at: usize) -> Result<(), ClipboardError> {
        self.mutations += 1;
        if at > self.frame_count {
            return Err(ClipboardError::Document(format!("无法在 {} 处插入帧", at)));
        }
        let shifted: HashMap<(LayerId, usize), Cel> = self
            .cels
            .drain()
            .map(|((layer, frame), cel)| {
                let frame = if frame >= at { frame + 1 } else { frame };
                ((layer, frame), cel)
            })
            .collect();
        self.cels = shifted;
        self.frame_count += 1;
        Ok(())
    }

    fn set_palette(&mut self, palette: Palette) -> Result<(), ClipboardError> {
        self.mutations += 1;
        self.palette = palette;
        Ok(())
    }
}

pub fn solid_rgb(width: u32, height: u32, color: [u8; 4]) -> Image {
    Image::Rgb(RgbaImage::from_pixel(width, height, Rgba(color)))
}

pub fn solid_indexed(width: u32, height: u32, index: u8) -> Image {
    Image::Indexed(GrayImage::from_pixel(width, height, Luma([index])))
}

/// 索引 0 透明，其余为不透明的纯色。
pub fn palette_of(colors: &[[u8; 3]]) -> Palette {
    let mut entries = vec![Rgba([0, 0, 0, 0])];
    entries.extend(colors.iter().map(|[r, g, b]| Rgba([*r, *g, *b, 255])));
    Palette::new(entries)
}

pub fn indexed_pixels(width: u32, height: u32, pixels: &[u8]) -> Image {
    let buf = GrayImage::from_raw(width, height, pixels.to_vec())
        .expect("pixel count matches size");
    Image::Indexed(buf)
}

/// 透明索引为 3 的索引色文档（单图层单帧），第 3 项本身是不透明的品红。
pub fn keyed_document(width: u32, height: u32, pixels: &[u8]) -> MemoryDocument {
    let palette = Palette::new(vec![
        Rgba([9, 9, 9, 255]),
        Rgba([255, 0, 0, 255]),
        Rgba([0, 255, 0, 255]),
        Rgba([255, 0, 255, 255]),
    ]);
    let mut doc = MemoryDocument::indexed(width, height, 1, 1, palette);
    doc.transparent_index = 3;
    doc.put_cel(0, 0, Point::new(0, 0), indexed_pixels(width, height, pixels));
    doc
}
