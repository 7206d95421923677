use anyhow::Error;
use opencv::core::{Mat, MatTraitConst, Vector};
use opencv::prelude::VectorToVec;
use opencv::imgcodecs::{imdecode, imencode, IMREAD_COLOR};
use opencv::imgproc::{cvt_color, COLOR_BGR2RGB};

use crate::utils::coordinate::FrameSize;

/// convert_image_to_mat decodes raw image bytes into an RGB matrix.
///
/// # Arguments
/// * `im_bytes` - encoded image bytes (JPEG, PNG, ...)
///
/// # Returns
/// * `Result<Mat, Error>`
pub fn convert_image_to_mat(im_bytes: &[u8]) -> Result<Mat, Error> {
    let img_as_mat = match Mat::from_slice(im_bytes) {
        Ok(img_as_mat) => img_as_mat,
        Err(e) => return Err(Error::from(e)),
    };

    let img_as_arr_bgr = match imdecode(&img_as_mat, IMREAD_COLOR) {
        Ok(img_as_arr_bgr) => img_as_arr_bgr,
        Err(e) => return Err(Error::from(e)),
    };

    // imdecode reports undecodable input as an empty matrix, not an error
    if img_as_arr_bgr.empty() {
        return Err(Error::msg("image - could not decode input bytes"));
    }

    let mut img_as_arr_rgb = Mat::default();
    match cvt_color(&img_as_arr_bgr, &mut img_as_arr_rgb, COLOR_BGR2RGB, 0) {
        Ok(_) => {}
        Err(e) => return Err(Error::from(e)),
    };

    Ok(img_as_arr_rgb)
}

/// frame_size returns the pixel dimensions of a decoded image.
pub fn frame_size(img: &Mat) -> Result<FrameSize, Error> {
    let size = img.size()?;
    Ok(FrameSize::new(size.width, size.height))
}

/// reencode_jpeg decodes the input bytes and re-encodes them as JPEG,
/// the interchange format the vision model API accepts.
pub fn reencode_jpeg(im_bytes: &[u8]) -> Result<Vec<u8>, Error> {
    let img_as_mat = Mat::from_slice(im_bytes)?;
    let img = imdecode(&img_as_mat, IMREAD_COLOR)?;
    if img.empty() {
        return Err(Error::msg("image - could not decode input bytes"));
    }

    let mut encoded: Vector<u8> = Vector::new();
    let params: Vector<i32> = Vector::new();
    imencode(".jpg", &img, &mut encoded, &params)?;
    Ok(encoded.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_bytes_do_not_decode() {
        let result = convert_image_to_mat(&[0u8; 16]);
        assert!(result.is_err());
    }

    #[test]
    fn test_garbage_bytes_do_not_reencode() {
        let result = reencode_jpeg(&[1u8, 2, 3, 4]);
        assert!(result.is_err());
    }
}
