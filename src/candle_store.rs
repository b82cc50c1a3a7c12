use crate::model::Candle;

/// 제한된 크기의 캔들 저장소
///
/// 지정된 최대 크기를 유지하며 캔들을 시간 오름차순으로 저장합니다.
/// 최대 크기를 초과하면 가장 오래된 캔들이 제거되고, 같은 타임스탬프의 캔들이
/// 다시 들어오면 최신 값으로 교체합니다(진행 중인 봉 갱신). 따라서 저장된
/// 시계열은 항상 지표 엔진의 전제 조건(엄격한 오름차순)을 만족합니다.
#[derive(Debug, Clone)]
pub struct CandleStore<T: Candle> {
    items: Vec<T>,
    pub max_size: usize,
}

impl<T> CandleStore<T>
where
    T: Candle,
{
    /// 새로운 CandleStore 인스턴스를 생성합니다.
    ///
    /// # Arguments
    /// * `items` - 초기 캔들 목록 (순서 무관)
    /// * `max_size` - 저장소의 최대 크기
    ///
    /// # Returns
    /// * `CandleStore<T>` - 생성된 저장소 인스턴스
    pub fn new(items: Vec<T>, max_size: usize) -> CandleStore<T> {
        let mut store = CandleStore {
            items: Vec::with_capacity(items.len().min(max_size)),
            max_size,
        };
        store.extend(items);
        store
    }

    /// 캔들을 타임스탬프 순서에 맞게 삽입합니다.
    ///
    /// # Arguments
    /// * `data` - 삽입할 캔들
    ///
    /// # Returns
    /// * `bool` - 새로 추가되었으면 true, 기존 봉을 교체했으면 false
    pub fn add(&mut self, data: T) -> bool {
        let timestamp = data.timestamp();
        match self
            .items
            .binary_search_by(|item| item.timestamp().cmp(&timestamp))
        {
            Ok(index) => {
                log::trace!("기존 봉 교체: {}", timestamp);
                self.items[index] = data;
                false
            }
            Err(index) => {
                self.items.insert(index, data);
                if self.items.len() > self.max_size {
                    let excess = self.items.len() - self.max_size;
                    self.items.drain(0..excess);
                }
                true
            }
        }
    }

    /// 여러 캔들을 한 번에 삽입합니다.
    pub fn extend(&mut self, items: impl IntoIterator<Item = T>) {
        for item in items {
            self.add(item);
        }
    }

    /// 저장소에 있는 캔들 수
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// 저장소가 비어 있는지 확인
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 가장 오래된 캔들
    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    /// 가장 최근 캔들
    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    /// 지정된 인덱스의 캔들 (0이 가장 오래된 캔들)
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// 시간 오름차순 캔들 슬라이스
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// 저장소를 비웁니다.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}
