use crate::{Digest, Output};
use utils::Block;

const BLOCK_SIZE: usize = 64;
const WORD_SIZE: usize = 4;
const DIGEST_WSIZE: usize = 8;
// 消息长度以64位大端序追加在填充末尾
const LEN_SIZE: usize = 8;

/// 国标[SM3](http://www.gmbz.org.cn/main/viewfile/20180108023812835219.html)
///
/// 无内部状态, 每次调用`SM3::digest`从初始向量`IV`开始计算.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SM3;

impl SM3 {
    const IV: [u32; DIGEST_WSIZE] = [
        0x7380166f, 0x4914b2b9, 0x172442d7, 0xda8a0600, 0xa96f30bc, 0x163138aa, 0xe38dee4d,
        0xb0fb0e4e,
    ];

    #[inline]
    const fn t_j(round_idx: usize) -> u32 {
        if round_idx < 16 {
            0x79cc4519
        } else {
            0x7a879d8a
        }
    }

    #[inline]
    const fn ff_j(round_idx: usize, x: u32, y: u32, z: u32) -> u32 {
        if round_idx < 16 {
            x ^ y ^ z
        } else {
            (x & y) | (x & z) | (y & z)
        }
    }

    #[inline]
    const fn gg_j(round_idx: usize, x: u32, y: u32, z: u32) -> u32 {
        if round_idx < 16 {
            x ^ y ^ z
        } else {
            (x & y) | ((!x) & z)
        }
    }

    #[inline]
    const fn p_0(x: u32) -> u32 {
        x ^ x.rotate_left(9) ^ x.rotate_left(17)
    }

    #[inline]
    const fn p_1(x: u32) -> u32 {
        x ^ x.rotate_left(15) ^ x.rotate_left(23)
    }

    /// 填充消息: `msg | 0x80 | 0x00... | bit_len(msg)`, 填充后的字节长度是64的整数倍.
    ///
    /// 设消息位长度为`l`, 填充`k`个0位, `k`是满足`l + 1 + k + 64 ≡ 0 (mod 512)`的最小非负整数.
    pub fn pad(msg: &[u8]) -> Vec<u8> {
        let bit_len = (msg.len() as u64).wrapping_mul(8);
        let rem = msg.len() % BLOCK_SIZE;
        let zeros = if rem < BLOCK_SIZE - LEN_SIZE {
            BLOCK_SIZE - LEN_SIZE - 1 - rem
        } else {
            2 * BLOCK_SIZE - LEN_SIZE - 1 - rem
        };

        let mut buf = Vec::with_capacity(msg.len() + 1 + zeros + LEN_SIZE);
        buf.extend_from_slice(msg);
        buf.push(0x80);
        buf.resize(buf.len() + zeros, 0);
        buf.extend_from_slice(&bit_len.to_be_bytes());
        buf
    }

    /// 压缩函数`CF(V, B)`, 结果异或回`digest`
    fn compress(digest: &mut [u32; DIGEST_WSIZE], chunk: &[u8]) {
        let mut words = [0u32; 68];

        for (word, d) in words.iter_mut().zip(chunk.chunks_exact(WORD_SIZE)) {
            *word = u32::from_be_bytes(Block::to_arr_uncheck(d));
        }

        for j in 16..68 {
            words[j] = Self::p_1(words[j - 16] ^ words[j - 9] ^ words[j - 3].rotate_left(15))
                ^ words[j - 13].rotate_left(7)
                ^ words[j - 6];
        }

        let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *digest;

        // W'_j = W_j ^ W_{j+4}, j = 0..64
        for (j, (&word_j, &word_j4)) in words.iter().zip(words.iter().skip(4)).enumerate() {
            let tmp = word_j ^ word_j4;
            let s1 = a
                .rotate_left(12)
                .wrapping_add(e)
                .wrapping_add(Self::t_j(j).rotate_left((j % 32) as u32))
                .rotate_left(7);
            let s2 = s1 ^ a.rotate_left(12);
            let t1 = Self::ff_j(j, a, b, c)
                .wrapping_add(d)
                .wrapping_add(s2)
                .wrapping_add(tmp);
            let t2 = Self::gg_j(j, e, f, g)
                .wrapping_add(h)
                .wrapping_add(s1)
                .wrapping_add(word_j);
            d = c;
            c = b.rotate_left(9);
            b = a;
            a = t1;
            h = g;
            g = f.rotate_left(19);
            f = e;
            e = Self::p_0(t2);
        }

        for (v, x) in digest.iter_mut().zip([a, b, c, d, e, f, g, h]) {
            *v ^= x;
        }
    }
}

impl Digest for SM3 {
    const BLOCK_BITS: usize = BLOCK_SIZE << 3;
    const WORD_BITS: usize = WORD_SIZE << 3;
    const DIGEST_BITS: usize = 256;

    fn digest(msg: &[u8]) -> Output<Self> {
        let mut digest = Self::IV;

        for chunk in Self::pad(msg).chunks_exact(BLOCK_SIZE) {
            Self::compress(&mut digest, chunk);
        }

        Output::from_vec(
            digest
                .iter()
                .flat_map(|x| x.to_be_bytes())
                .collect::<Vec<_>>(),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::sm3::SM3;
    use crate::Digest;

    #[test]
    fn sm3() {
        let cases = [
            (
                "66c7f0f462eeedd9d1f2d46bdc10e4e24167c4875cf2f7a2297da02b8f4ba8e0",
                "abc",
            ),
            (
                "debe9ff92275b8a138604889c18e5a4d6fdb70e5387e5765293dcba39c0c5732",
                "abcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcd",
            ),
            (
                "44f0061e69fa6fdfc290c494654a05dc0c053da7e5c52b84ef93a9d67d3fff88",
                "hello world",
            ),
            (
                "1ab21d8355cfa17f8e61194831e81a8f22bec8c728fefb747ed035eb5082aa2b",
                "",
            ),
        ]
        .into_iter()
        .map(|(x, msg)| (hex::decode(x).unwrap(), msg))
        .collect::<Vec<_>>();

        for (i, (tgt, msg)) in cases.into_iter().enumerate() {
            assert_eq!(tgt, SM3::digest(msg.as_bytes()).to_vec(), "case {i} failed");
        }
    }

    #[test]
    fn sm3_digest_len() {
        for len in [0usize, 1, 55, 56, 63, 64, 65, 119, 120, 1000] {
            let msg = vec![0x5au8; len];
            let d = SM3::digest(&msg);
            assert_eq!(d.len(), 32, "case len {len} failed");
            assert_eq!(d, SM3::digest(&msg), "case len {len} not deterministic");
        }
    }

    #[test]
    fn sm3_pad() {
        for len in [0usize, 1, 55, 56, 63, 64, 65, 119, 120, 127, 128] {
            let msg = vec![0xffu8; len];
            let padded = SM3::pad(&msg);

            assert_eq!(padded.len() % 64, 0, "case len {len} not block aligned");
            assert!(
                padded.len() - len <= 64 + 8,
                "case len {len} padded too much: {}",
                padded.len()
            );
            assert_eq!(&padded[..len], msg.as_slice());
            assert_eq!(padded[len], 0x80);

            let tail = &padded[(padded.len() - 8)..];
            assert_eq!(tail, ((len as u64) * 8).to_be_bytes().as_slice());
            assert!(padded[(len + 1)..(padded.len() - 8)].iter().all(|&x| x == 0));
        }

        assert_eq!(SM3::pad(&[0u8; 55]).len(), 64);
        assert_eq!(SM3::pad(&[0u8; 56]).len(), 128);
    }

    #[test]
    fn sm3_distinct_inputs() {
        assert_ne!(SM3::digest(b"hello world"), SM3::digest(b"hello worle"));
        assert_ne!(SM3::digest(&[0u8; 64]), SM3::digest(&[0u8; 65]));
    }
}
